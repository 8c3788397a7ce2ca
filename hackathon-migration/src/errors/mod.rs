mod migration;

pub use migration::MigrationError;
