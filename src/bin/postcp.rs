use clap::Parser;
use postcp::commands::postcp::args::Args;
use postcp::config::Config;

/// Copy each input file to a postfixed name next to the original.
fn main() {
    let args = Args::parse();

    // Usage check comes before config loading so the error path performs
    // no writes at all, not even the default config file.
    if args.files.len() < 2 {
        println!("ERROR: pass the input files and a postfix.");
        std::process::exit(1);
    }

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("postcp: {e}");
            std::process::exit(1);
        }
    };

    let (postfix, files) = args.files.split_last().unwrap();
    let exit_code = postcp::commands::postcp::run(
        files.to_vec(),
        postfix.clone(),
        args.no_clobber,
        config,
    );
    std::process::exit(exit_code);
}
