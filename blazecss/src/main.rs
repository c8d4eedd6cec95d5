use blazecss_lib::{
    render_inline_with, render_with, DeclarationList, RenderOptions, Stylesheet, UnitKind,
};
use clap::Parser;
use log::info;
use std::fs;
use std::path::PathBuf;

const BLAZECSS_INTRO: &str = r#"
        ____  __                 ________________
       / __ )/ /___ _____  ___  / ____/ ___/ ___/
      / __  / / __ `/_  / / _ \/ /    \__ \\__ \
     / /_/ / / /_/ / / /_/  __/ /___ ___/ /__/ /
    /_____/_/\__,_/ /___/\___/\____//____/____/

    BlazeCSS - build a stylesheet in Rust, write it out as CSS.
"#;

#[derive(Parser)]
#[command(name = "BlazeCSS")]
#[command(about = "Render a sample stylesheet as pretty or minified CSS")]
struct Args {
    /// Strip whitespace, comments and zero units.
    #[arg(short, long)]
    minify: bool,

    /// Indentation for pretty output: a number of spaces, or "tab".
    #[arg(short, long, default_value = "4", value_parser = parse_indent)]
    indent: String,

    /// Render the sample inline style instead of the stylesheet.
    #[arg(long)]
    inline: bool,

    /// Output file name. Writes to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_indent(raw: &str) -> Result<String, String> {
    if raw.eq_ignore_ascii_case("tab") {
        return Ok("\t".to_string());
    }
    raw.parse::<usize>()
        .map(|width| " ".repeat(width))
        .map_err(|_| format!("expected a number of spaces or 'tab', got '{}'", raw))
}

fn sample_stylesheet() -> blazecss_lib::Result<Stylesheet> {
    let mut css = Stylesheet::named("sample");

    let body = css.create_selector("body", None)?;
    body.append_declaration("margin-top", 10, UnitKind::Pixels)?;
    body.append_declaration("margin-left", 10, UnitKind::Pixels)?;
    body.append_declaration("font-family", "Helvetica", UnitKind::Font)?;

    let h1 = css.create_selector("h1", None)?;
    h1.append_declaration("font-size", 2.5, UnitKind::Em)?;
    h1.append_declaration("color", (0, 0, 0), UnitKind::Rgb)?;

    let card = css.create_selector(".card", None)?;
    card.append_declaration("layout", "cards share the page grid", UnitKind::Remark)?;
    card.append_declaration("margin", [0, 10, 0, 10], UnitKind::Pixels)?;
    card.append_declaration("width", 50, UnitKind::Percent)?;
    card.append_declaration("background-image", "img/paper.png", UnitKind::Url)?;

    let header = css.create_selector("#header", None)?;
    header.append_declaration("line-height", 1.2, UnitKind::Number)?;
    header.append_important("display", "flex", UnitKind::String)?;
    header.append_declaration("padding", 0, UnitKind::Em)?;

    Ok(css)
}

fn sample_inline_style() -> blazecss_lib::Result<DeclarationList> {
    let mut style = DeclarationList::new();
    style.append_declaration("margin", 0, UnitKind::Pixels)?;
    style.append_important("color", (200, 30, 30), UnitKind::Rgb)?;
    Ok(style)
}

fn run(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    let options = RenderOptions::default()
        .minify(args.minify)
        .indent(args.indent.as_str());

    let text = if args.inline {
        render_inline_with(&sample_inline_style()?, &options)
    } else {
        let css = sample_stylesheet()?;
        info!(
            "rendering {} selectors from '{}'",
            css.len(),
            css.name().unwrap_or_default()
        );
        render_with(&css, &options)
    };
    Ok(text)
}

fn main() {
    env_logger::init();

    // parse the args given in terminal
    let args: Args = Args::parse();

    let text = match run(&args) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error building stylesheet: {}", e);
            std::process::exit(1);
        }
    };

    match &args.output {
        Some(path) => {
            println!("{}", BLAZECSS_INTRO);
            if let Err(e) = fs::write(path, &text) {
                eprintln!("Error writing CSS file: {}", e);
                std::process::exit(1);
            }
            println!("Wrote {} bytes to {}.", text.len(), path.display());
        }
        None => print!("{}", text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_indent() {
        assert_eq!(parse_indent("2"), Ok("  ".to_string()));
        assert_eq!(parse_indent("TAB"), Ok("\t".to_string()));
        assert!(parse_indent("wide").is_err());
    }

    #[test]
    fn test_sample_renders() {
        let args = Args::parse_from(["blazecss", "--minify"]);
        let text = run(&args).unwrap();
        assert!(text.starts_with("body{margin-top:10px;"));
        assert!(!text.contains("/*"));

        let args = Args::parse_from(["blazecss", "--inline", "--indent", "tab"]);
        assert_eq!(
            run(&args).unwrap(),
            "margin: 0px; color: rgb(200, 30, 30) !important"
        );
    }
}
