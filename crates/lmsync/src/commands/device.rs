//! Device command handlers.

use lmsync_core::{DeviceSpec, PropertySet, Reconciler};

use crate::cli::{DeviceArgs, DeviceCommand, GlobalOpts};
use crate::context;
use crate::error::CliError;
use crate::output;

pub async fn handle(args: DeviceArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        DeviceCommand::Apply(apply) => {
            let ctx = context::build(global)?;

            let spec = DeviceSpec {
                display_name: apply.display_name.unwrap_or_else(|| apply.name.clone()),
                name: apply.name,
                description: apply.description,
                host_group: apply.host_group,
                collector_group: apply.collector_group,
                properties: PropertySet::new(apply.properties),
                alert_disable: apply.alert_disable,
                netflow_collector: apply.netflow_collector,
            };

            let outcome = Reconciler::new(&ctx.client)
                .with_policy(ctx.policy)
                .dry_run(ctx.dry_run)
                .device(&spec, apply.state.into())
                .await?;

            let out = output::render_outcome(&global.output, &global.color, &outcome)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
