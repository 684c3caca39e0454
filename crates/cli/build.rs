use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("siteprint")
        .version("1.0.0")
        .author("Siteprint Contributors")
        .about("Condense web pages into titles, copy, images and colors")
        .arg(clap::arg!(<INPUT> "Local HTML file, or '-' for stdin"))
        .arg(clap::arg!(-u --url <URL> "URL the markup was fetched from").value_name("URL"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (json, text)")
                .value_name("FORMAT")
                .default_value("json")
                .value_parser(["json", "text"]),
        )
        .arg(clap::arg!(--pretty "Pretty-print JSON output"))
        .arg(
            clap::arg!(-c --config <FILE> "Extractor configuration file (JSON)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--"max-texts" <NUM> "Maximum number of text snippets"))
        .arg(clap::arg!(--"max-images" <NUM> "Maximum number of images"))
        .arg(clap::arg!(--"max-colors" <NUM> "Maximum number of colors"))
        .arg(clap::arg!(--"line-width" <COLS> "Wrap text snippets at this width").default_value("0"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    for shell in [
        clap_complete::Shell::Bash,
        clap_complete::Shell::Zsh,
        clap_complete::Shell::Fish,
        clap_complete::Shell::PowerShell,
    ] {
        clap_complete::generate_to(shell, &mut cmd, "siteprint", &completions_dir).unwrap();
    }

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
