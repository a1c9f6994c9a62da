use clap::Parser;
use clap_complete::Shell;

/// generate convolution and im2col test vectors for the accelerator
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// config files merged over configs/default.toml, later ones win
    pub config_names: Vec<String>,

    /// seed of the random image and kernel, overrides the config
    #[clap(short, long)]
    pub seed: Option<u64>,

    /// directory of the json run report
    #[clap(long, default_value = "output/reports")]
    pub report_dir: String,

    /// log at debug level
    #[clap(short, long)]
    pub verbose: bool,

    /// print the completion script for a shell and exit
    #[clap(long = "generate", arg_enum)]
    pub generator: Option<Shell>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let args = Args::try_parse_from([
            "conv_testgen",
            "configs/optional_configs/low_bit_depth.toml",
            "--seed",
            "42",
            "-v",
        ])
        .unwrap();
        assert_eq!(
            args.config_names,
            vec!["configs/optional_configs/low_bit_depth.toml".to_string()]
        );
        assert_eq!(args.seed, Some(42));
        assert!(args.verbose);
        assert_eq!(args.report_dir, "output/reports");
        assert!(args.generator.is_none());

        let args = Args::try_parse_from(["conv_testgen", "--generate", "bash"]).unwrap();
        assert_eq!(args.generator, Some(Shell::Bash));
    }

    #[test]
    fn test_bad_seed() {
        assert!(Args::try_parse_from(["conv_testgen", "--seed", "-3"]).is_err());
    }
}
