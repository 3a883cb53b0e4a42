//! Program Image Loader.
//!
//! This module places a program into physical memory before the processor is reset. It performs:
//! 1. **Source resolution:** Reads the image from a file path or takes caller-supplied bytes.
//! 2. **Format detection:** Images beginning with the ELF magic are parsed as ELF; anything
//!    else is a raw binary.
//! 3. **Placement:** Raw binaries are copied verbatim to the load address, which is also the
//!    entry point. ELF images have each loadable segment copied to its physical address,
//!    zero-filling the tail beyond its file data, and supply their own entry point.
//!
//! Every segment is bounds-checked before the first byte is written, so a rejected image
//! leaves memory untouched.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use object::{Object, ObjectSegment};
use tracing::debug;

use crate::common::data::AccessType;
use crate::common::error::LoadError;
use crate::soc::memory::check_range;
use crate::soc::traits::PhysicalMemory;

/// Leading bytes of every ELF file.
const ELF_MAGIC: &[u8; 4] = b"\x7fELF";

/// Where a program image comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgramImage {
    /// A file on the host, read when the image is loaded.
    Path(PathBuf),
    /// Bytes already in host memory.
    Bytes(Vec<u8>),
}

impl ProgramImage {
    /// Image read from `path` at load time.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// Image taken from `bytes`.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(bytes.into())
    }

    fn contents(&self) -> Result<Cow<'_, [u8]>, LoadError> {
        match self {
            Self::Path(path) => fs::read(path)
                .map(Cow::Owned)
                .map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                }),
            Self::Bytes(bytes) => Ok(Cow::Borrowed(bytes)),
        }
    }
}

impl From<&Path> for ProgramImage {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

/// Detected encoding of an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    /// Flat binary.
    Raw,
    /// ELF executable.
    Elf,
}

/// Result of placing an image into memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadedImage {
    /// Address execution should start at.
    pub entry: u64,
    /// Bytes written to memory, zero fill included.
    pub bytes_written: u64,
    /// Encoding the image was loaded as.
    pub format: ImageFormat,
}

/// Copies a program image into memory.
///
/// # Arguments
///
/// * `image` - Source of the image
/// * `memory` - Destination memory
/// * `load_addr` - Placement and entry point of raw binaries
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, [`LoadError::Empty`]
/// for an empty image, [`LoadError::Elf`] or [`LoadError::NoLoadableSegments`]
/// for unusable ELF files, [`LoadError::EntryOutOfRange`] if the ELF entry
/// point is not inside memory, and [`LoadError::Memory`] if any part of the
/// image falls outside memory. Memory is unchanged on error.
pub fn load_image(
    image: &ProgramImage,
    memory: &mut dyn PhysicalMemory,
    load_addr: u64,
) -> Result<LoadedImage, LoadError> {
    let data = image.contents()?;
    if data.is_empty() {
        return Err(LoadError::Empty);
    }

    let loaded = if data.starts_with(ELF_MAGIC) {
        load_elf(&data, memory)?
    } else {
        check_range(
            AccessType::Write,
            load_addr,
            data.len() as u64,
            memory.capacity(),
        )?;
        memory.write(load_addr, &data)?;
        LoadedImage {
            entry: load_addr,
            bytes_written: data.len() as u64,
            format: ImageFormat::Raw,
        }
    };

    debug!(
        format = ?loaded.format,
        entry = format_args!("{:#x}", loaded.entry),
        bytes = loaded.bytes_written,
        "program image loaded"
    );
    Ok(loaded)
}

fn load_elf(data: &[u8], memory: &mut dyn PhysicalMemory) -> Result<LoadedImage, LoadError> {
    let file = object::File::parse(data)?;

    let mut segments = Vec::new();
    for segment in file.segments() {
        let bytes = segment.data()?;
        let mem_size = segment.size().max(bytes.len() as u64);
        if mem_size == 0 {
            continue;
        }
        check_range(
            AccessType::Write,
            segment.address(),
            mem_size,
            memory.capacity(),
        )?;
        segments.push((segment.address(), bytes, mem_size));
    }
    if segments.is_empty() {
        return Err(LoadError::NoLoadableSegments);
    }
    let entry = file.entry();
    let capacity = memory.capacity();
    if entry >= capacity || entry > u64::from(u32::MAX) {
        return Err(LoadError::EntryOutOfRange { entry, capacity });
    }

    let mut bytes_written = 0;
    for (addr, bytes, mem_size) in segments {
        memory.write(addr, bytes)?;
        let fill = mem_size - bytes.len() as u64;
        if fill > 0 {
            memory.write(addr + bytes.len() as u64, &vec![0u8; fill as usize])?;
        }
        bytes_written += mem_size;
    }

    Ok(LoadedImage {
        entry,
        bytes_written,
        format: ImageFormat::Elf,
    })
}
