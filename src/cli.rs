// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;

use clap::Parser;

use crate::cmd::list::ListFormat;
use crate::cmd::list::print_stories;
use crate::cmd::pitch::print_pitch;
use crate::cmd::serve::server::start_server;
use crate::config::Config;
use crate::error::Fallible;
use crate::rank::OrderContext;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Show where pitch falls in a kana reading.
    Pitch {
        /// The reading, in kana.
        reading: String,
        /// Pitch descriptor, e.g. "2,3". Omit for unknown pitch.
        #[arg(long)]
        pitch: Option<String>,
    },
    /// List stories in presentation order.
    List {
        /// Path to the config file. Defaults to `./dokusho.toml`.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Base URL of the storage service.
        #[arg(long)]
        backend: Option<String>,
        /// Story ordering.
        #[arg(long)]
        view: Option<OrderContext>,
        /// Output format.
        #[arg(long, default_value_t = ListFormat::Text)]
        format: ListFormat,
    },
    /// Run the reader in the browser.
    Serve {
        /// Path to the config file. Defaults to `./dokusho.toml`.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Base URL of the storage service.
        #[arg(long)]
        backend: Option<String>,
        /// Port to listen on.
        #[arg(long)]
        port: Option<u16>,
        /// Default story ordering.
        #[arg(long)]
        view: Option<OrderContext>,
        /// Open the reader in the browser once the server is up.
        #[arg(long)]
        open: bool,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Pitch { reading, pitch } => print_pitch(&reading, pitch.as_deref()),
        Command::List {
            config,
            backend,
            view,
            format,
        } => {
            let config = Config::load(config.as_deref())?.with_overrides(backend, None, view);
            print_stories(&config, format).await
        }
        Command::Serve {
            config,
            backend,
            port,
            view,
            open,
        } => {
            let config = Config::load(config.as_deref())?.with_overrides(backend, port, view);
            start_server(config, open).await
        }
    }
}
