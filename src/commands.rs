//! CLI pages and the routes they render.

use clap::{Args, Subcommand};

use crate::api::ReportKind;
use crate::session::Route;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
  /// Sign in and store the credential
  Login {
    username: String,
    /// Password (read from stdin when not given)
    #[arg(short, long, env = "WASTESORT_PASSWORD", hide_env_values = true)]
    password: Option<String>,
  },
  /// Create an account
  Register {
    username: String,
    email: String,
    /// Password (read from stdin when not given)
    #[arg(short, long, env = "WASTESORT_PASSWORD", hide_env_values = true)]
    password: Option<String>,
  },
  /// Forget the stored credential
  Logout,
  /// Show the signed-in user
  Whoami,
  /// Profile and featured waste categories
  Dashboard,
  /// Browse waste categories
  #[command(visible_alias = "c")]
  Categories(CategoryArgs),
  /// Show one waste category
  Category { id: String },
  /// Browse disposal guidelines
  #[command(visible_alias = "g")]
  Guidelines(GuidelineArgs),
  /// Show one disposal guideline
  Guideline { id: String },
  /// Browse recycling centers
  #[command(visible_alias = "rc")]
  Centers(CenterArgs),
  /// Show one recycling center
  Center { id: String },
  /// Collection reports
  Reports {
    #[arg(short, long, value_enum, default_value_t = ReportKind::Comprehensive)]
    kind: ReportKind,
  },
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct CategoryArgs {
  /// Match name or description
  #[arg(short, long)]
  pub search: Option<String>,
  /// Only recyclable (true) or non-recyclable (false) categories
  #[arg(long)]
  pub recyclable: Option<bool>,
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct GuidelineArgs {
  /// Match title or description
  #[arg(short, long)]
  pub search: Option<String>,
  /// Only guidelines for this waste category
  #[arg(long)]
  pub category: Option<String>,
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct CenterArgs {
  /// Match name or address
  #[arg(short, long)]
  pub search: Option<String>,
  /// Only active (true) or inactive (false) centers
  #[arg(long)]
  pub active: Option<bool>,
  /// Only centers accepting this waste category id
  #[arg(long)]
  pub waste_category: Option<String>,
}

impl Command {
  /// The route a command renders.
  pub fn route(&self) -> Route {
    match self {
      Command::Login { .. } => Route::Login { expired: false },
      Command::Register { .. } => Route::Register,
      Command::Logout | Command::Whoami => Route::Home,
      Command::Dashboard => Route::Dashboard,
      Command::Categories(_) => Route::WasteCategories,
      Command::Category { id } => Route::WasteCategory(id.clone()),
      Command::Guidelines(_) => Route::DisposalGuidelines,
      Command::Guideline { id } => Route::DisposalGuideline(id.clone()),
      Command::Centers(_) => Route::RecyclingCenters,
      Command::Center { id } => Route::RecyclingCenter(id.clone()),
      Command::Reports { .. } => Route::Reports,
    }
  }
}
