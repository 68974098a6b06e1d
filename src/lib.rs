mod domain;
mod interfaces;
mod infrastructure;
pub mod constants;
pub mod errors;
pub mod settings;

pub use domain::{entities, use_cases};
pub use interfaces::repositories;
pub use infrastructure::{db, utils};

use repositories::sqlx_repo::SqlxExperienceRepo;
use use_cases::experience::ExperienceHandler;

pub type AppExperienceHandler = ExperienceHandler<SqlxExperienceRepo>;

pub struct AppState {
    pub experience_handler: AppExperienceHandler,
}

impl AppState {
    pub fn new(pool: sqlx::PgPool) -> Self {
        let experience_repo = SqlxExperienceRepo::new(pool);
        let experience_handler = ExperienceHandler::new(experience_repo);

        AppState { experience_handler }
    }
}
