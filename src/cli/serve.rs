//! Serve command implementation

use crate::cli::ServeArgs;
use crate::core::config::Config;
use crate::core::error::Result;

/// Apply command-line overrides to the loaded configuration
pub fn apply_args(config: &mut Config, args: &ServeArgs) {
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.degrade_errors {
        config.upstream.degrade_errors = true;
    }
}

/// Run the serve command
pub async fn run(args: ServeArgs, mut config: Config) -> Result<()> {
    apply_args(&mut config, &args);
    crate::web::run(&config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        let args = ServeArgs {
            host: Some("0.0.0.0".to_string()),
            port: Some(8080),
            degrade_errors: false,
        };
        apply_args(&mut config, &args);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert!(!config.upstream.degrade_errors);

        let args = ServeArgs {
            host: None,
            port: None,
            degrade_errors: true,
        };
        apply_args(&mut config, &args);
        assert_eq!(config.server.port, 8080);
        assert!(config.upstream.degrade_errors);
    }
}
