//! List every path under a directory of a filesystem.
//!
//! ```shell
//! export AZURE_STORAGE_ACCOUNT_NAME=myaccount
//! export AZURE_STORAGE_ACCOUNT_KEY=bXkta2V5
//! cargo run --example list_paths -- myfilesystem some/directory
//! ```

use adlg2_core::{Context, OsEnv, Result};
use adlg2_dfs::{Client, Config, PathListOptions};
use adlg2_http_send_reqwest::ReqwestHttpSend;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let filesystem = args.next().expect("usage: list_paths <filesystem> [directory]");
    let directory = args.next();

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let config = Config::default().from_env(&ctx);
    let client = Client::new(config, ctx)?;

    let paths = client
        .path()
        .list(
            &filesystem,
            &PathListOptions {
                recursive: true,
                directory,
                ..Default::default()
            },
        )
        .await?;

    println!("fetched {} paths", paths.len());
    for path in paths {
        println!(
            "{}\t{}\t{}",
            path.name,
            if path.is_directory == "true" { "dir" } else { "file" },
            path.content_length
        );
    }

    Ok(())
}
