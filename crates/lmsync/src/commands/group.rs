//! Device-group command handlers.

use lmsync_core::{DeviceGroupSpec, PropertySet, Reconciler};

use crate::cli::{GlobalOpts, GroupArgs, GroupCommand};
use crate::context;
use crate::error::CliError;
use crate::output;

pub async fn handle(args: GroupArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        GroupCommand::Apply(apply) => {
            let ctx = context::build(global)?;

            let spec = DeviceGroupSpec {
                name: apply.name,
                description: apply.description,
                parent_group: apply.parent_group,
                collector_group: apply.collector_group,
                properties: PropertySet::new(apply.properties),
                alert_disable: apply.alert_disable,
            };

            let outcome = Reconciler::new(&ctx.client)
                .with_policy(ctx.policy)
                .dry_run(ctx.dry_run)
                .device_group(&spec, apply.state.into())
                .await?;

            let out = output::render_outcome(&global.output, &global.color, &outcome)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
