use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "postcp")]
#[command(about = "Copy files to postfixed names", long_about = None)]
pub struct Args {
    /// 既存ファイルを上書きせずにエラー行として報告する
    #[arg(short = 'n')]
    pub no_clobber: bool,

    /// Input files followed by the postfix as the last argument
    #[arg(num_args = 0..)]
    pub files: Vec<String>,
}
