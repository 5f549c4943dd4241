//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::ControlProperties;
use crate::control::ControlMode;

/// Edit a comma-separated tag field as colored chips.
///
/// The final value is printed to stdout when the editor closes.
#[derive(Debug, Parser)]
#[command(name = "tag-chips", version, about)]
pub struct Cli {
    /// Raw field value, e.g. "Test,Vip,Another"
    #[arg(short, long)]
    pub value: Option<String>,

    /// Config file (defaults to <config dir>/tag-chips/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum tag length in characters
    #[arg(long)]
    pub max_tag_length: Option<i64>,

    /// Chips shown before the rest collapse behind "+N"
    #[arg(long)]
    pub max_tags_to_show: Option<i64>,

    /// Chip color when dynamic colors are off
    #[arg(long)]
    pub default_color: Option<String>,

    /// Give each tag its own color
    #[arg(long, overrides_with = "no_dynamic_colors")]
    pub dynamic_colors: bool,

    /// Use the default color for every tag, even if the config enables dynamic colors
    #[arg(long, overrides_with = "dynamic_colors")]
    pub no_dynamic_colors: bool,

    /// JSON object mapping tag text to a color
    #[arg(long)]
    pub palette: Option<String>,

    /// Show the tags without allowing changes
    #[arg(long)]
    pub read_only: bool,

    /// Hide the entry box, as for a control hidden on the form
    #[arg(long)]
    pub hidden: bool,

    /// Print the normalized value and exit without opening the editor
    #[arg(long)]
    pub normalize: bool,
}

impl Cli {
    /// Control properties set on the command line.
    pub fn overrides(&self) -> ControlProperties {
        ControlProperties {
            value: self.value.clone(),
            default_tag_color: self.default_color.clone(),
            use_dynamic_colors: self.dynamic_colors_override(),
            custom_tag_palette: self.palette.clone(),
            max_tags_to_show: self.max_tags_to_show,
            max_tag_length: self.max_tag_length,
        }
    }

    fn dynamic_colors_override(&self) -> Option<bool> {
        match (self.dynamic_colors, self.no_dynamic_colors) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// Presentation mode requested on the command line.
    pub fn mode(&self) -> ControlMode {
        ControlMode {
            editable: !self.read_only,
            visible: !self.hidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_from_args() {
        let cli = Cli::parse_from([
            "tag-chips",
            "--value",
            "a,b",
            "--max-tag-length",
            "8",
            "--dynamic-colors",
            "--palette",
            r##"{"A":"#FF0000"}"##,
        ]);
        let props = cli.overrides();

        assert_eq!(props.raw_value(), "a,b");
        assert_eq!(props.max_tag_length, Some(8));
        assert_eq!(props.use_dynamic_colors, Some(true));
        assert_eq!(props.custom_tag_palette.as_deref(), Some(r##"{"A":"#FF0000"}"##));
        assert!(props.max_tags_to_show.is_none());
    }

    #[test]
    fn test_no_dynamic_colors_turns_config_setting_off() {
        let cli = Cli::parse_from(["tag-chips", "--no-dynamic-colors"]);
        assert_eq!(cli.overrides().use_dynamic_colors, Some(false));

        let mut props = ControlProperties {
            use_dynamic_colors: Some(true),
            ..Default::default()
        };
        props.merge(cli.overrides());
        assert_eq!(props.use_dynamic_colors, Some(false));
    }

    #[test]
    fn test_last_dynamic_colors_flag_wins() {
        let cli = Cli::parse_from(["tag-chips", "--dynamic-colors", "--no-dynamic-colors"]);
        assert_eq!(cli.overrides().use_dynamic_colors, Some(false));

        let cli = Cli::parse_from(["tag-chips", "--no-dynamic-colors", "--dynamic-colors"]);
        assert_eq!(cli.overrides().use_dynamic_colors, Some(true));
    }

    #[test]
    fn test_unset_flags_do_not_override() {
        let cli = Cli::parse_from(["tag-chips"]);
        assert_eq!(cli.overrides(), ControlProperties::default());
        assert_eq!(cli.mode(), ControlMode::default());
    }

    #[test]
    fn test_mode_flags() {
        let cli = Cli::parse_from(["tag-chips", "--read-only", "--hidden"]);
        assert_eq!(
            cli.mode(),
            ControlMode {
                editable: false,
                visible: false
            }
        );
    }
}
