use colored::Colorize;

fn main() {
    if let Err(e) = siteplot::run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
