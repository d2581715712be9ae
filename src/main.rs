// This file is part of the terraform-provider-fortios project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
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

use tf_provider::serve;
use tracing_subscriber::EnvFilter;

use crate::fortios_provider::FortiosProvider;

mod client;
mod cmdb;
mod fortios_provider;
mod mapping;
mod resources;
mod utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Terraform owns stdout for the plugin handshake
    let filter = std::env::var("TF_LOG_PROVIDER_FORTIOS")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    serve("fortios", FortiosProvider::default())
        .await
        .map_err(|err| anyhow::anyhow!("{err}"))?;
    Ok(())
}
