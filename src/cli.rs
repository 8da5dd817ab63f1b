use chrono::NaiveDate;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "gitlab-commits", about = "Count a GitLab user's commits across projects")]
/// Options for the CLI
pub struct Opt {
    #[structopt(
        parse(from_os_str),
        default_value("config.toml"),
        help = "path to configuration file"
    )]
    pub config: PathBuf,
    #[structopt(
        short,
        long,
        help = "first day to count, overrides date_range.start_date, ex: 2024-01-01"
    )]
    pub start: Option<NaiveDate>,
    #[structopt(
        short,
        long,
        help = "last day to count (inclusive), overrides date_range.end_date, ex: 2024-01-31"
    )]
    pub end: Option<NaiveDate>,
    #[structopt(long, default_value("30"), help = "request timeout in seconds")]
    pub timeout: u64,
}
