use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("cleanreader")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render a saved web page in distraction-free reader mode")
        .arg(clap::arg!(<INPUT> "Local HTML file, or '-' for stdin"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (view, html, markdown, text, json)")
                .value_name("FORMAT")
                .default_value("view")
                .value_parser(["view", "html", "markdown", "text", "json"]),
        )
        .arg(clap::arg!(--toc "Write only the table of contents"))
        .arg(clap::arg!(--stats "Print reading stats to stderr"))
        .arg(clap::arg!(--roundtrip "Toggle reader mode on and off and check the page comes back unchanged"))
        .arg(clap::arg!(--"base-url" <URL> "URL the page was saved from, used to resolve relative links").required(false))
        .arg(clap::arg!(--selector <SELECTOR> ... "Content selector to try, in order").required(false))
        .arg(clap::arg!(--"chars-per-minute" <NUM> "Reading speed for the time estimate").required(false).default_value("400"))
        .arg(
            clap::arg!(--"toc-indent" <PX> "TOC indentation per heading level, in pixels")
                .required(false)
                .default_value("20"),
        )
        .arg(clap::arg!(--frontmatter "Include TOML frontmatter (Markdown only)"))
        .arg(clap::arg!(--"no-images" "Strip images from output (Markdown only)"))
        .arg(clap::arg!(--pretty "Pretty-print JSON output"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "cleanreader", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "cleanreader", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "cleanreader", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "cleanreader", &completions_dir).unwrap();

    println!("cargo:warning=Shell completions generated in: {}", completions_dir.display());
}
