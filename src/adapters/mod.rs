/*
Copyright 2024 San Francisco Compute Company

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Implementations of the secondary ports

pub mod secondary {
    pub mod config {
        pub mod file;

        pub use file::*;
    }

    pub mod host {
        pub mod table;

        pub use table::*;
    }

    pub mod publisher {
        pub mod file;

        pub use file::*;
    }

    pub mod source {
        pub mod file;

        pub use file::*;
    }
}

pub use secondary::config::FileConfigurationProvider;
pub use secondary::host::{HostRecord, HostTable, NoHostResolver};
pub use secondary::publisher::FileSystemRepository;
pub use secondary::source::{FileInventorySource, InventoryDump};
