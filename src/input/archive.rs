use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tar::{Archive, Builder};

use crate::input::InputError;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

fn open_maybe_gz(path: &Path) -> Result<Box<dyn Read>, InputError> {
    let mut file = File::open(path)?;
    let mut magic = [0u8; 2];
    let mut filled = 0usize;
    while filled < magic.len() {
        let n = file.read(&mut magic[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    file.seek(SeekFrom::Start(0))?;

    let reader = BufReader::new(file);
    if filled == magic.len() && magic == GZIP_MAGIC {
        Ok(Box::new(GzDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}

/// Extracts `archive_path` into `directory`.
///
/// With a `pattern`, only regular files whose member name ends with it are
/// kept, and each lands directly in `directory` under its base name.
/// Without one, the archive is unpacked with its directory layout intact.
/// Returns the paths written.
pub fn untar(
    directory: &Path,
    archive_path: &Path,
    pattern: Option<&str>,
) -> Result<Vec<PathBuf>, InputError> {
    fs::create_dir_all(directory)?;
    let mut archive = Archive::new(open_maybe_gz(archive_path)?);
    let entries = archive
        .entries()
        .map_err(|e| InputError::archive(archive_path, e))?;

    let mut written = Vec::new();
    for entry in entries {
        let mut entry = entry.map_err(|e| InputError::archive(archive_path, e))?;
        let member = entry
            .path()
            .map_err(|e| InputError::archive(archive_path, e))?
            .into_owned();

        match pattern {
            Some(suffix) => {
                if !entry.header().entry_type().is_file() {
                    continue;
                }
                if !member.to_string_lossy().ends_with(suffix) {
                    continue;
                }
                let Some(name) = member.file_name() else {
                    continue;
                };
                let target = directory.join(name);
                entry
                    .unpack(&target)
                    .map_err(|e| InputError::archive(archive_path, e))?;
                written.push(target);
            }
            None => {
                let unpacked = entry
                    .unpack_in(directory)
                    .map_err(|e| InputError::archive(archive_path, e))?;
                if unpacked {
                    written.push(directory.join(&member));
                } else {
                    tracing::warn!(
                        member = %member.display(),
                        "skipped archive member escaping the extraction folder"
                    );
                }
            }
        }
    }

    tracing::debug!(
        archive = %archive_path.display(),
        into = %directory.display(),
        count = written.len(),
        "extracted archive"
    );
    Ok(written)
}

/// Bundles every entry of `directory` into a tar archive with names relative
/// to `directory` itself, so the archive carries no leading folder.
pub fn pack(directory: &Path, archive_path: &Path) -> Result<usize, InputError> {
    let mut members = fs::read_dir(directory)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    members.sort();

    let archive_abs = fs::canonicalize(archive_path.parent().unwrap_or(Path::new(".")))
        .ok()
        .zip(archive_path.file_name())
        .map(|(dir, name)| dir.join(name));

    let mut builder = Builder::new(BufWriter::new(File::create(archive_path)?));
    let mut count = 0usize;
    for path in members {
        let Some(name) = path.file_name() else {
            continue;
        };
        if archive_abs.is_some() && fs::canonicalize(&path).ok() == archive_abs {
            continue;
        }
        if path.is_dir() {
            builder.append_dir_all(name, &path)?;
        } else {
            builder.append_path_with_name(&path, name)?;
        }
        count += 1;
    }
    builder.into_inner()?.flush()?;
    Ok(count)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/archive.rs"]
mod tests;
