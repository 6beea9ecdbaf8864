use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let dictionary = || {
        clap::arg!(-d --dictionary <DIR> "Dictionary directory with MasterDictionary/ and StopWords/")
            .value_parser(clap::value_parser!(std::path::PathBuf))
    };

    let batch = clap::Command::new("batch")
        .about("Fetch every URL of an input table and write one metrics row per input row")
        .arg(clap::arg!(<INPUT> "Input CSV with URL_ID and URL columns").value_parser(clap::value_parser!(PathBuf)))
        .arg(
            clap::arg!(-o --output <FILE> "Output file")
                .default_value("Output.csv")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(clap::arg!(-f --format <FORMAT> "Output format (csv, json)").value_parser(["csv", "json"]))
        .arg(dictionary())
        .arg(clap::arg!(--"delay-ms" <MS> "Pause after each request, in milliseconds").default_value("500"))
        .arg(clap::arg!(-j --concurrency <NUM> "Maximum number of articles fetched at once").default_value("1"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("10"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests"))
        .arg(
            clap::arg!(--artifacts <DIR> "Save the extracted text of each article in this directory")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(clap::arg!(--"checkpoint-every" <NUM> "Write intermediate results every NUM completed articles"))
        .arg(
            clap::arg!(--"checkpoint-dir" <DIR> "Directory for intermediate results")
                .value_parser(clap::value_parser!(PathBuf)),
        );

    let text = clap::Command::new("text")
        .about("Analyze a single local text (or HTML) file and print its metrics as JSON")
        .arg(clap::arg!(<INPUT> "Text file to analyze, or '-' for stdin"))
        .arg(clap::arg!(--html "Treat the input as HTML and analyze its extracted article text"))
        .arg(dictionary());

    let completions = clap::Command::new("completions")
        .about("Generate a shell completion script")
        .arg(clap::arg!(<SHELL> "Target shell").value_parser(["bash", "elvish", "fish", "powershell", "zsh"]));

    let mut cmd = clap::Command::new("lexis")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Lexis Contributors")
        .about("Sentiment and readability metrics for web articles")
        .arg(clap::arg!(-v --verbose "Enable debug logging").global(true))
        .subcommand_required(true)
        .subcommand(batch)
        .subcommand(text)
        .subcommand(completions);

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "lexis", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "lexis", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "lexis", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "lexis", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
