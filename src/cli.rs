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

use crate::cmd::check::check_library;
use crate::cmd::log_loss::log_loss;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_library_stats;
use crate::config::Overrides;
use crate::config::Settings;
use crate::disposition::DispositionForm;
use crate::error::Fallible;
use crate::library::Library;
use crate::web::server::start_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Start the training server.
    Serve {
        /// Optional path to a content directory. Missing files fall back to the built-in content.
        directory: Option<String>,
        /// The host address to bind to. Default is 127.0.0.1.
        #[arg(long)]
        host: Option<String>,
        /// The port to use for the web server. Default is 8000.
        #[arg(long)]
        port: Option<u16>,
        /// Where logged losses are sent.
        #[arg(long)]
        webhook_url: Option<String>,
        /// Don't open the browser automatically.
        #[arg(long)]
        no_open: bool,
    },
    /// Check the integrity of the content.
    Check {
        /// Optional path to a content directory.
        directory: Option<String>,
    },
    /// Print content statistics.
    Stats {
        /// Optional path to a content directory.
        directory: Option<String>,
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Json)]
        format: StatsFormat,
    },
    /// Log a lost call and send it to the webhook.
    LogLoss {
        #[arg(long)]
        agent_name: String,
        #[arg(long)]
        agent_id: String,
        #[arg(long)]
        disposition: String,
        /// Overrides the webhook in `settings.toml`.
        #[arg(long)]
        webhook_url: Option<String>,
        /// Optional path to a content directory.
        directory: Option<String>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Serve {
            directory,
            host,
            port,
            webhook_url,
            no_open,
        } => {
            let directory = directory.map(PathBuf::from);
            let library = Library::load(directory.clone())?;
            let overrides = Overrides {
                host,
                port,
                webhook_url,
                no_open,
            };
            let settings = Settings::load(directory.as_deref(), overrides)?;
            start_server(library, settings).await
        }
        Command::Check { directory } => check_library(directory),
        Command::Stats { directory, format } => print_library_stats(directory, format),
        Command::LogLoss {
            agent_name,
            agent_id,
            disposition,
            webhook_url,
            directory,
        } => {
            let form = DispositionForm {
                agent_name,
                agent_id,
                disposition,
            };
            log_loss(directory, form, webhook_url).await
        }
    }
}
