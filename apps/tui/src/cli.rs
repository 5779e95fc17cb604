use clap::{CommandFactory, Parser};

#[derive(Debug, Parser)]
#[command(
    name = "forensic-dash",
    version,
    about = "Bilingual forensic analysis dashboard"
)]
pub struct CliArgs {
    /// Analyze --image once, print the result and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless result as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Image to analyze in headless mode
    #[arg(long, value_name = "PATH")]
    pub image: Option<String>,

    /// Data source: mock, analyze or recognize
    #[arg(long, value_name = "SOURCE")]
    pub source: Option<String>,

    /// Analysis backend base URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Initial language: ar or en
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,

    /// Dashboard layout: classic, investigation or full
    #[arg(long, value_name = "PRESET")]
    pub layout: Option<String>,

    /// sequential (fetch after the steps) or concurrent
    #[arg(long = "fetch-mode", value_name = "MODE")]
    pub fetch_mode: Option<String>,

    /// Draw prediction routes as straight lines without calling the router
    #[arg(long = "no-routing")]
    pub no_routing: bool,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        let overrides = [
            ("FORENSIC_SOURCE", &self.source),
            ("FORENSIC_API_URL", &self.api_url),
            ("FORENSIC_LANGUAGE", &self.language),
            ("FORENSIC_LAYOUT", &self.layout),
            ("FORENSIC_FETCH_MODE", &self.fetch_mode),
        ];
        for (key, value) in overrides {
            if let Some(value) = value {
                std::env::set_var(key, value);
            }
        }
        if self.no_routing {
            std::env::set_var("FORENSIC_ROUTING", "off");
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headless_flags() {
        let args = CliArgs::parse_from([
            "forensic-dash",
            "--headless",
            "--json",
            "--image",
            "scene.jpg",
            "--fetch-mode",
            "sequential",
            "--no-routing",
        ]);
        assert!(args.headless && args.json && args.no_routing);
        assert_eq!(args.image.as_deref(), Some("scene.jpg"));
        assert_eq!(args.fetch_mode.as_deref(), Some("sequential"));
    }

    #[test]
    fn help_lists_the_options() {
        let help = CliArgs::help_text();
        assert!(help.contains("--api-url"));
        assert!(help.contains("--layout"));
    }
}
