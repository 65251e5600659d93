use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("newsapi")
        .version("1.0.0")
        .about("Query news sources and headlines from the News API")
        .arg(
            clap::Arg::new("api_key")
                .long("api-key")
                .value_name("KEY")
                .help("API key (sent with articles queries)"),
        )
        .arg(clap::arg!(--host <URL> "Base URL of the API").default_value("https://newsapi.org"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds (default: none)"))
        .arg(clap::arg!(-p --pretty "Pretty-print the JSON response"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(-v --verbose "Enable debug logging"))
        .subcommand(
            clap::Command::new("sources")
                .about("List news sources")
                .arg(clap::arg!(--category <CATEGORY> "Only sources in this category"))
                .arg(clap::arg!(--language <LANGUAGE> "Only sources in this language"))
                .arg(clap::arg!(--country <COUNTRY> "Only sources from this country")),
        )
        .subcommand(
            clap::Command::new("articles")
                .about("List articles from a source")
                .arg(clap::arg!(--source <SOURCE> "Source identifier").required(true))
                .arg(
                    clap::Arg::new("sort_by")
                        .long("sort-by")
                        .value_name("SORT_BY")
                        .help("Sort order (top, latest, popular)"),
                ),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "newsapi", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "newsapi", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "newsapi", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "newsapi", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
