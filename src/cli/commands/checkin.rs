use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::checkin::{CheckInLogic, StubCamera};
use crate::errors::AppResult;
use crate::geo::SimulatedDevice;
use crate::store::Store;
use crate::ui::messages::info;

/// Run the check-in flow against the simulated device.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Checkin { skip_verification } = cmd {
        let rt = tokio::runtime::Runtime::new()?;
        let result: AppResult<()> = rt.block_on(async {
            let store = Store::open()?;
            let provider = SimulatedDevice::new(cfg.office_latitude, cfg.office_longitude);

            let record =
                CheckInLogic::perform(&provider, &StubCamera, &store, cfg, *skip_verification)
                    .await?;

            info(format!(
                "Checked in at {}. Have a good day, {}!",
                record.check_in_str(),
                cfg.worker_name
            ));
            Ok(())
        });
        result?;
    }
    Ok(())
}
