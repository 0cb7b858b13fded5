//! Alert-tuning command handlers.

use lmsync_core::{Reconciler, TuningSpec};

use crate::cli::{GlobalOpts, TuningArgs, TuningCommand};
use crate::context;
use crate::error::CliError;
use crate::output;

pub async fn handle(args: TuningArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        TuningCommand::Apply(apply) => {
            let ctx = context::build(global)?;

            let spec = TuningSpec {
                device_display_name: apply.device,
                datasource: apply.datasource,
                instance: apply.instance,
                datapoint: apply.datapoint,
                threshold: apply.threshold,
                alert_disable: apply.alert_disable,
            };

            let outcome = Reconciler::new(&ctx.client)
                .with_policy(ctx.policy)
                .dry_run(ctx.dry_run)
                .tuning(&spec)
                .await?;

            let out = output::render_outcome(&global.output, &global.color, &outcome)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
