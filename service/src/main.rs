//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use ttybridge_service::{Arguments, BridgeConfig, BridgeSetManager, Result};

#[tokio::main]
async fn main() -> ExitCode {
    // Load arguments from the command line
    let arguments: Arguments = Parser::parse();

    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .with_ansi(true)
        .init();

    match run(&arguments).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_connection_closed() => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(arguments: &Arguments) -> Result<()> {
    let config = BridgeConfig::load(&arguments.config_file)
        .inspect_err(|_| error!("Unable to load {}", arguments.config_file.display()))?
        .with_arguments(arguments);
    debug!("Configuration loaded: {:?}", config);
    info!("Starting ttybridge for server {}", config.server.name);

    let manager = BridgeSetManager::new(config);
    let bridges = manager.connect().await?;

    // Ctrl-C tears down the same way a lost connection does
    let signal = bridges.signal();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted");
            signal.fire();
        }
    });

    bridges.run().await
}
