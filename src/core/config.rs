// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
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

//! Declarative memory layouts
//!
//! A layout describes a [`MemoryMap`] in TOML: a default byte order and a list
//! of regions, each one a ROM, a RAM or a nested map.
//!
//! # Format
//!
//! ```toml
//! byte_order = "little"
//!
//! [[region]]
//! name = "boot"
//! kind = "rom"
//! base = 0x0000
//! size = 1024
//! padding = [0xFF]
//! words = [0x3C080000, 0x00000000]   # or bytes = [...], or image = "boot.bin"
//!
//! [[region]]
//! kind = "ram"
//! base = 0x1000
//! size = 4096
//!
//! [[region]]
//! kind = "map"
//! base = 0x2000
//!
//! [[region.region]]
//! kind = "ram"
//! base = 0x0
//! size = 16
//! ```
//!
//! Regions without their own `byte_order` inherit the enclosing one. Unknown
//! keys are rejected. Relative `image` paths are resolved against the layout
//! file's directory when loaded with [`LayoutConfig::load`], and against the
//! current directory otherwise.
//!
//! # Example
//!
//! ```
//! use membus::core::config::LayoutConfig;
//! use membus::core::memory::Memory;
//!
//! let layout = LayoutConfig::from_toml_str(
//!     r#"
//!     [[region]]
//!     kind = "rom"
//!     base = 0
//!     bytes = [0xCA, 0xFE]
//!
//!     [[region]]
//!     kind = "ram"
//!     base = 0x100
//!     size = 0x100
//!     "#,
//! )
//! .unwrap();
//!
//! let mut bus = layout.build().unwrap();
//! bus.write_word(0x100, 0x01020304).unwrap();
//! assert_eq!(bus.read_half(0).unwrap(), 0xCAFE);
//! assert_eq!(bus.read_word(0x100).unwrap(), 0x01020304);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::error::{ConfigError, Result};
use crate::core::memory::{
    share, Address, ByteOrder, MemoryMap, Ram, Rom, RomOptions, SharedMemory,
};

/// Top-level layout document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    /// Byte order of the top-level map and default for every region
    #[serde(default)]
    pub byte_order: ByteOrder,

    /// Regions mapped into the top-level map
    #[serde(default, rename = "region")]
    pub regions: Vec<RegionConfig>,
}

/// One `[[region]]` entry, selected by the `kind` key
///
/// Every variant rejects keys it does not know, so a misspelled field is a
/// parse error rather than a silent default.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RegionConfig {
    Rom(RomConfig),
    Ram(RamConfig),
    Map(MapConfig),
}

/// `kind = "rom"`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RomConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub base: Address,
    #[serde(default)]
    pub byte_order: Option<ByteOrder>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub padding: Option<Vec<u8>>,
    #[serde(default)]
    pub bytes: Option<Vec<u8>>,
    #[serde(default)]
    pub words: Option<Vec<u32>>,
    #[serde(default)]
    pub image: Option<PathBuf>,
}

/// `kind = "ram"`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RamConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub base: Address,
    #[serde(default)]
    pub byte_order: Option<ByteOrder>,
    #[serde(default = "default_ram_size")]
    pub size: u64,
}

/// `kind = "map"`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub base: Address,
    #[serde(default)]
    pub byte_order: Option<ByteOrder>,
    #[serde(default, rename = "region")]
    pub regions: Vec<RegionConfig>,
}

fn default_ram_size() -> u64 {
    Ram::DEFAULT_SIZE
}

impl RegionConfig {
    /// Base address inside the enclosing map
    pub fn base(&self) -> Address {
        match self {
            RegionConfig::Rom(rom) => rom.base,
            RegionConfig::Ram(ram) => ram.base,
            RegionConfig::Map(map) => map.base,
        }
    }

    /// Label used in log messages and errors
    pub fn name(&self) -> Option<&str> {
        match self {
            RegionConfig::Rom(rom) => rom.name.as_deref(),
            RegionConfig::Ram(ram) => ram.name.as_deref(),
            RegionConfig::Map(map) => map.name.as_deref(),
        }
    }

    /// Explicit byte order, if the region overrides the inherited one
    pub fn byte_order(&self) -> Option<ByteOrder> {
        match self {
            RegionConfig::Rom(rom) => rom.byte_order,
            RegionConfig::Ram(ram) => ram.byte_order,
            RegionConfig::Map(map) => map.byte_order,
        }
    }

    fn label(&self) -> String {
        self.name()
            .map(str::to_owned)
            .unwrap_or_else(|| format!("at 0x{:08X}", self.base()))
    }
}

impl LayoutConfig {
    /// Parse a layout from TOML text
    ///
    /// # Errors
    ///
    /// Returns `MembusError::Config` wrapping `ConfigError::Parse` on malformed
    /// input, including keys a region does not accept.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let layout: Self = toml::from_str(text).map_err(ConfigError::from)?;
        Ok(layout)
    }

    /// Read and parse a layout file
    ///
    /// Relative ROM `image` paths are rebased onto the directory holding the
    /// layout file.
    ///
    /// # Errors
    ///
    /// Returns `MembusError::Io` if the file cannot be read, or the errors of
    /// [`LayoutConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let mut layout = Self::from_toml_str(&text)?;

        if let Some(dir) = path.parent() {
            rebase_images(&mut layout.regions, dir);
        }

        log::debug!(
            "Loaded layout {} ({} top-level regions)",
            path.display(),
            layout.regions.len()
        );
        Ok(layout)
    }

    /// Instantiate every component and assemble the top-level map
    ///
    /// # Errors
    ///
    /// Any construction error of the components or maps involved, plus
    /// `ConfigError::RomContent` for ROM entries without exactly one source.
    pub fn build(&self) -> Result<MemoryMap> {
        build_map(&self.regions, self.byte_order)
    }
}

fn rebase_images(regions: &mut [RegionConfig], dir: &Path) {
    for region in regions {
        match region {
            RegionConfig::Rom(rom) => {
                if let Some(image) = rom.image.as_mut().filter(|image| image.is_relative()) {
                    *image = dir.join(&*image);
                }
            }
            RegionConfig::Map(map) => rebase_images(&mut map.regions, dir),
            RegionConfig::Ram(_) => {}
        }
    }
}

fn build_map(regions: &[RegionConfig], byte_order: ByteOrder) -> Result<MemoryMap> {
    let mut mapping = Vec::with_capacity(regions.len());
    for region in regions {
        mapping.push((region.base(), build_component(region, byte_order)?));
    }
    MemoryMap::new(mapping, byte_order)
}

fn build_component(region: &RegionConfig, inherited: ByteOrder) -> Result<SharedMemory> {
    let byte_order = region.byte_order().unwrap_or(inherited);
    let label = region.label();

    log::debug!("Building region {} ({:?})", label, byte_order);

    match region {
        RegionConfig::Ram(ram) => Ok(share(Ram::new(ram.size, byte_order)?)),
        RegionConfig::Map(map) => Ok(share(build_map(&map.regions, byte_order)?)),
        RegionConfig::Rom(rom) => {
            let mut options = RomOptions::default().with_byte_order(byte_order);
            options.size = rom.size;
            if let Some(padding) = &rom.padding {
                options.padding = padding.clone();
            }

            let built = match (&rom.bytes, &rom.words, &rom.image) {
                (Some(bytes), None, None) => Rom::from_bytes(bytes, &options)?,
                (None, Some(words), None) => Rom::from_words(words, &options)?,
                (None, None, Some(image)) => Rom::load(image, &options)?,
                _ => return Err(ConfigError::RomContent { region: label }.into()),
            };
            Ok(share(built))
        }
    }
}
