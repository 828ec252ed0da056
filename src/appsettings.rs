use config::{Config, ConfigError, Environment, File, Source};

use carebell_models::settings::Settings;

/// `appsettings.*` next to the binary, then `appsettings.local.*`, then `APP__*` variables.
pub fn load() -> Result<Settings, ConfigError> {
    load_from(
        vec![
            File::with_name("appsettings").required(true),
            File::with_name("appsettings.local").required(false),
        ],
        Environment::with_prefix("APP").separator("__"),
    )
}

/// Later files override earlier ones; the environment overrides all of them.
fn load_from<S>(files: Vec<S>, environment: Environment) -> Result<Settings, ConfigError>
where
    S: Source + Send + Sync + 'static,
{
    files
        .into_iter()
        .fold(Config::builder(), |builder, file| builder.add_source(file))
        .add_source(environment)
        .build()?
        .try_deserialize()
}
