//! Command handlers driving the sync controller.

use anyhow::{Context, Result};
use log::debug;
use tokio::sync::broadcast::error::RecvError;
use vigil_core::{
    display::{
        CheckInResult, CreateResult, DeleteResult, OfficialDocument, Outcome, PlanList,
        SummaryReport, UpdateResult,
    },
    params::{PlanId, ToggleVehicle},
    sync::ChangeOrigin,
    SyncController, SyncEvent,
};

use crate::{
    cli::{DocumentArgs, ExportArgs, PlanCommands, VehicleCommands},
    renderer::TerminalRenderer,
};

/// Runs one CLI command against a controller and renders the result.
pub struct Cli {
    controller: SyncController,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(controller: SyncController, renderer: TerminalRenderer) -> Self {
        for notice in controller.startup_notices() {
            renderer.warn(&notice.to_string());
        }
        Self {
            controller,
            renderer,
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => {
                let params = args.into_params()?;
                let plan = self.controller.create(&params)?;
                self.renderer.render(&CreateResult::new(plan).to_string())
            }
            PlanCommands::List => self.list_plans(),
            PlanCommands::Show(args) => {
                let PlanId { id } = args.into();
                let plan = self.controller.plan(&id)?;
                self.renderer.render(&plan.to_string())
            }
            PlanCommands::Edit(args) => {
                let params = args.into_params()?;
                let changes = params
                    .validate()?
                    .changed_fields()
                    .into_iter()
                    .map(String::from)
                    .collect();
                let plan = self.controller.update_fields(&params)?;
                self.renderer
                    .render(&UpdateResult::with_changes(plan, changes).to_string())
            }
            PlanCommands::Status(args) => {
                let plan = self.controller.set_status(&args.into())?;
                let message = format!("Operation '{}' is now {}", plan.name, plan.status);
                self.renderer.render(&Outcome::success(message).to_string())
            }
            PlanCommands::Delete(args) => {
                let plan = self.controller.delete(&args.into())?;
                self.renderer.render(&DeleteResult::new(plan).to_string())
            }
        }
    }

    pub async fn handle_vehicle_command(&self, command: VehicleCommands) -> Result<()> {
        match command {
            VehicleCommands::Toggle(args) => {
                let params: ToggleVehicle = args.into();
                let plan = self.controller.toggle_vehicle(&params)?;
                let vehicle = plan
                    .vehicle(&params.vehicle_id)
                    .context("Toggled vehicle missing from plan")?;
                self.renderer
                    .render(&CheckInResult { plan: &plan, vehicle }.to_string())
            }
        }
    }

    pub fn list_plans(&self) -> Result<()> {
        let plans = PlanList(self.controller.plans());
        self.renderer.render(&plans.to_string())
    }

    pub fn report(&self) -> Result<()> {
        let plans = self.controller.plans();
        self.renderer.render(&SummaryReport::new(&plans).to_string())
    }

    pub fn document(&self, args: DocumentArgs) -> Result<()> {
        let plan = self.controller.plan(&args.id)?;
        self.renderer
            .render(&OfficialDocument::new(&plan).to_string())
    }

    pub fn export(&self, args: ExportArgs) -> Result<()> {
        let path = self
            .controller
            .export_backup(&args.output)
            .context("Failed to export backup")?;
        self.renderer.render(
            &Outcome::success(format!("Backup written to {}", path.display())).to_string(),
        )
    }

    /// Prints every change until Ctrl-C.
    pub async fn watch(&self) -> Result<()> {
        let mut events = self.controller.subscribe_events();
        self.list_plans()?;

        loop {
            tokio::select! {
                signal = tokio::signal::ctrl_c() => {
                    signal.context("Failed to listen for Ctrl-C")?;
                    return Ok(());
                }
                event = events.recv() => match event {
                    Ok(SyncEvent::PlansChanged { origin: ChangeOrigin::Remote }) => {
                        self.list_plans()?;
                    }
                    Ok(SyncEvent::PlansChanged { origin: ChangeOrigin::Local }) => {}
                    Ok(SyncEvent::StatusChanged(status)) => debug!("Sync status: {status}"),
                    Ok(SyncEvent::Notice(notice)) => self.renderer.warn(&notice.to_string()),
                    Err(RecvError::Lagged(skipped)) => {
                        debug!("Skipped {skipped} events");
                        self.list_plans()?;
                    }
                    Err(RecvError::Closed) => return Ok(()),
                },
            }
        }
    }

    /// Waits for pending writes, reports sync failures and shuts down.
    pub async fn finish(self) -> Result<()> {
        if self.controller.status().is_syncing() {
            debug!("Waiting for remote writes to finish");
        }
        self.controller.wait_idle().await;
        if let Some(error) = self.controller.last_sync_error() {
            self.renderer.warn(&format!(
                "Saved on this device but not synchronized: {error}"
            ));
        }
        self.controller
            .shutdown()
            .await
            .context("Failed to shut down sync controller")
    }
}
