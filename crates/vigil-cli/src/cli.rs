//! Command-line argument wrappers using clap
//!
//! Each wrapper carries clap attributes and converts into the matching core
//! parameter struct, so core types stay free of CLI concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Sync Controller
//! ```
//!
//! Values are passed through as typed; counts, dates and times are validated
//! by the core params, which produce the error messages users see.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use vigil_core::{
    params::{
        CreatePlan, DeletePlan, PlanId, SetStatus, ToggleVehicle, UpdatePlan, DEFAULT_EQUIPMENT,
        DEFAULT_MACRO_REGION, DEFAULT_RADIO, DEFAULT_UNIFORM,
    },
    photo::load_photo,
};

/// Register a new operation plan
#[derive(Args)]
pub struct CreatePlanArgs {
    /// Event or operation name
    pub name: String,
    #[arg(short, long, default_value = "", help = "Where the operation takes place")]
    pub location: String,
    #[arg(short, long, default_value = "", help = "Date of the operation (YYYY-MM-DD)")]
    pub date: String,
    #[arg(short = 't', long, default_value = "", help = "Start time (HH:MM)")]
    pub start_time: String,
    #[arg(long, default_value = "", help = "Responsible inspectorate")]
    pub inspectorate: String,
    #[arg(long, default_value = DEFAULT_MACRO_REGION, help = "Macro region")]
    pub macro_region: String,
    #[arg(long, default_value = "", help = "Mission objective")]
    pub objective: String,
    #[arg(long, default_value = "", help = "Expected scenario")]
    pub scenario: String,
    #[arg(long, default_value = DEFAULT_UNIFORM, help = "Uniform for the deployment")]
    pub uniform: String,
    #[arg(long, default_value = DEFAULT_RADIO, help = "Radio channel")]
    pub radio: String,
    #[arg(long, default_value = DEFAULT_EQUIPMENT, help = "Equipment carried")]
    pub equipment: String,
    #[arg(long, default_value = "", help = "Meeting point before deployment")]
    pub meeting_point: String,
    #[arg(short, long, default_value = "10", help = "Number of agents")]
    pub agents: String,
    #[arg(short, long, default_value = "2", help = "Number of vehicles to check in")]
    pub vehicles: String,
    #[arg(long, default_value = "", help = "Nominal list of the deployed team")]
    pub team: String,
    #[arg(short, long, default_value = "", help = "Officer responsible for the order")]
    pub responsible: String,
    #[arg(long, help = "Image file to attach (png, jpg, webp or gif)")]
    pub photo: Option<PathBuf>,
}

impl CreatePlanArgs {
    /// Converts into core params, encoding the photo file if one was given.
    pub fn into_params(self) -> vigil_core::Result<CreatePlan> {
        let photo = self.photo.as_deref().map(load_photo).transpose()?;
        Ok(CreatePlan {
            name: self.name,
            inspectorate: self.inspectorate,
            macro_region: self.macro_region,
            location: self.location,
            date: self.date,
            start_time: self.start_time,
            objective: self.objective,
            scenario: self.scenario,
            uniform: self.uniform,
            radio: self.radio,
            equipment: self.equipment,
            meeting_point: self.meeting_point,
            agents_count: self.agents,
            vehicles_count: self.vehicles,
            deployed_team: self.team,
            responsible: self.responsible,
            photo,
        })
    }
}

/// Identify a single operation plan
#[derive(Args)]
pub struct PlanIdArgs {
    #[arg(help = "Identifier of the operation plan")]
    pub id: String,
}

impl From<PlanIdArgs> for PlanId {
    fn from(val: PlanIdArgs) -> Self {
        PlanId { id: val.id }
    }
}

/// Edit descriptive fields of an operation plan
///
/// Only the given fields change. Changing the vehicle count adds or removes
/// vehicles at the end of the check-in list.
#[derive(Args)]
pub struct EditPlanArgs {
    #[arg(help = "Identifier of the operation plan to edit")]
    pub id: String,
    #[arg(short, long)]
    pub name: Option<String>,
    #[arg(short, long)]
    pub location: Option<String>,
    #[arg(short, long, help = "Date of the operation (YYYY-MM-DD)")]
    pub date: Option<String>,
    #[arg(short = 't', long, help = "Start time (HH:MM)")]
    pub start_time: Option<String>,
    #[arg(long)]
    pub inspectorate: Option<String>,
    #[arg(long)]
    pub macro_region: Option<String>,
    #[arg(long)]
    pub objective: Option<String>,
    #[arg(long)]
    pub scenario: Option<String>,
    #[arg(long)]
    pub uniform: Option<String>,
    #[arg(long)]
    pub radio: Option<String>,
    #[arg(long)]
    pub equipment: Option<String>,
    #[arg(long)]
    pub meeting_point: Option<String>,
    #[arg(short, long)]
    pub agents: Option<String>,
    #[arg(short, long)]
    pub vehicles: Option<String>,
    #[arg(long)]
    pub team: Option<String>,
    #[arg(short, long)]
    pub responsible: Option<String>,
    #[arg(long, conflicts_with = "clear_photo", help = "Image file to attach")]
    pub photo: Option<PathBuf>,
    #[arg(long, help = "Remove the attached photo")]
    pub clear_photo: bool,
}

impl EditPlanArgs {
    /// Converts into core params, encoding the photo file if one was given.
    pub fn into_params(self) -> vigil_core::Result<UpdatePlan> {
        let photo = self.photo.as_deref().map(load_photo).transpose()?;
        Ok(UpdatePlan {
            id: self.id,
            name: self.name,
            inspectorate: self.inspectorate,
            macro_region: self.macro_region,
            location: self.location,
            date: self.date,
            start_time: self.start_time,
            objective: self.objective,
            scenario: self.scenario,
            uniform: self.uniform,
            radio: self.radio,
            equipment: self.equipment,
            meeting_point: self.meeting_point,
            agents_count: self.agents,
            vehicles_count: self.vehicles,
            deployed_team: self.team,
            responsible: self.responsible,
            photo,
            clear_photo: self.clear_photo,
        })
    }
}

/// Move an operation plan forward in its lifecycle
///
/// Status only moves forward: planned, in-progress, completed. Completing a
/// plan closes vehicle check-in.
#[derive(Args)]
pub struct SetStatusArgs {
    #[arg(help = "Identifier of the operation plan")]
    pub id: String,
    #[arg(help = "New status")]
    pub status: StatusArg,
}

impl From<SetStatusArgs> for SetStatus {
    fn from(val: SetStatusArgs) -> Self {
        SetStatus {
            id: val.id,
            status: val.status.to_string(),
        }
    }
}

/// Permanently delete an operation plan
#[derive(Args)]
pub struct DeletePlanArgs {
    #[arg(help = "Identifier of the operation plan to delete")]
    pub id: String,
    #[arg(long, help = "Confirm the deletion; required")]
    pub confirm: bool,
}

impl From<DeletePlanArgs> for DeletePlan {
    fn from(val: DeletePlanArgs) -> Self {
        DeletePlan {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Register a new operation plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// List all operation plans
    #[command(alias = "l")]
    List,
    /// Show details of an operation plan
    #[command(alias = "s")]
    Show(PlanIdArgs),
    /// Edit fields of an operation plan
    #[command(alias = "e")]
    Edit(EditPlanArgs),
    /// Change an operation plan's status
    Status(SetStatusArgs),
    /// Permanently delete an operation plan
    Delete(DeletePlanArgs),
}

/// Toggle a vehicle's arrival
#[derive(Args)]
pub struct ToggleVehicleArgs {
    #[arg(help = "Identifier of the operation plan")]
    pub plan_id: String,
    #[arg(help = "Vehicle identifier, e.g. VT-1")]
    pub vehicle_id: String,
}

impl From<ToggleVehicleArgs> for ToggleVehicle {
    fn from(val: ToggleVehicleArgs) -> Self {
        ToggleVehicle {
            plan_id: val.plan_id,
            vehicle_id: val.vehicle_id,
        }
    }
}

#[derive(Subcommand)]
pub enum VehicleCommands {
    /// Mark a vehicle as arrived, or undo it
    #[command(alias = "t")]
    Toggle(ToggleVehicleArgs),
}

/// Print the official document for one operation
#[derive(Args)]
pub struct DocumentArgs {
    #[arg(help = "Identifier of the operation plan")]
    pub id: String,
}

/// Export all operations to a JSON backup file
#[derive(Args)]
pub struct ExportArgs {
    #[arg(
        short,
        long,
        default_value = ".",
        help = "Output file, or a directory to receive vigil_backup.json"
    )]
    pub output: PathBuf,
}

/// Command-line representation of operation statuses
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum StatusArg {
    /// Scheduled but not started
    Planned,
    /// Deployment under way
    InProgress,
    /// Deployment finished
    Completed,
}

impl std::fmt::Display for StatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusArg::Planned => write!(f, "planned"),
            StatusArg::InProgress => write!(f, "in-progress"),
            StatusArg::Completed => write!(f, "completed"),
        }
    }
}
