use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{ApiConfig, Config, DataConfig, OutputConfig};

/// Loads the application configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, deserializes it into our strongly-typed `Config`
/// struct, and returns it.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`
        .add_source(config::File::with_name("config.toml"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;

    if config.data.num_records == 0 {
        return Err(ConfigError::ValidationError(
            "data.num_records must be at least 1".to_string(),
        ));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_config_document() {
        let toml = r#"
            [api]
            base_url = "https://grid.example.com"
            timeout_secs = 30
            user_agent = "omnigrid-test/1.0"

            [data]
            use_sample_data = true
            num_records = 100
            seed = 42

            [output]
            directory = "output"
        "#;
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.data.seed, 42);
        assert_eq!(config.output.directory, "output");
    }
}
