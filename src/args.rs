use clap::Parser;


#[derive(Parser)]
#[derive(Debug)]
#[command(disable_help_flag = true, disable_version_flag = true)]
/// Run the Isilon quota script for a user.
pub struct Opts {
    /// User whose quota should be reported.
    /// Hyphenated values are taken as the username (and then rejected by validation),
    /// never as options.
    #[arg(allow_hyphen_values = true)]
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_positional_is_the_username() {
        let opts = Opts::try_parse_from(["call_isilon_quota", "alice123"]).unwrap();
        assert_eq!(opts.username, "alice123");
    }

    #[test]
    fn option_like_values_are_not_interpreted() {
        for value in ["-x", "--help", "--version", "-h"] {
            let opts = Opts::try_parse_from(["call_isilon_quota", value]).unwrap();
            assert_eq!(opts.username, value);
        }
    }

    #[test]
    fn missing_or_extra_arguments_fail() {
        assert!(Opts::try_parse_from(["call_isilon_quota"]).is_err());
        assert!(Opts::try_parse_from(["call_isilon_quota", "alice", "bob"]).is_err());
    }
}
