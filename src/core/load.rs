//! JSON record loader.
//!
//! Resources are named like `rec-gens` and live under a data directory as
//! `<dir>/<name>.json`; explicit paths and `-` (stdin) are accepted too.

use std::{
    fmt,
    fs::File,
    io::{self, BufReader, Read},
    path::{Path, PathBuf},
};

use crate::core::{error::LoadError, record::Record};

const BUF_CAP: usize = 1 << 20; // 1 MiB

/// Where records come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resource {
    Stdin,
    Path(PathBuf),
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

/// `-` → stdin; a bare name → `<data_dir>/<name>.json`; anything with an
/// extension is taken as a path.
#[must_use]
pub fn resolve_resource(data_dir: &Path, name: &str) -> Resource {
    if name == "-" {
        return Resource::Stdin;
    }
    let p = Path::new(name);
    if p.extension().is_some() {
        Resource::Path(p.to_path_buf())
    } else {
        Resource::Path(data_dir.join(format!("{name}.json")))
    }
}

/// Parse a JSON array of flat objects from any reader.
pub fn read_records<R: Read>(src: R, origin: &Resource) -> Result<Vec<Record>, LoadError> {
    let rdr = BufReader::with_capacity(BUF_CAP, src);
    serde_json::from_reader(rdr).map_err(|source| {
        if source.is_io() {
            LoadError::Io {
                path: origin.to_string(),
                source: io::Error::from(source),
            }
        } else {
            LoadError::Json {
                path: origin.to_string(),
                source,
            }
        }
    })
}

/// Load every record of `resource`, blocking until it is read.
pub fn load_records(resource: &Resource) -> Result<Vec<Record>, LoadError> {
    let records = match resource {
        Resource::Stdin => read_records(io::stdin().lock(), resource)?,
        Resource::Path(p) => {
            let file = File::open(p).map_err(|source| LoadError::Io {
                path: resource.to_string(),
                source,
            })?;
            read_records(file, resource)?
        }
    };
    tracing::debug!(%resource, records = records.len(), "loaded records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_names_live_in_the_data_dir() {
        let dir = Path::new("data");
        assert_eq!(
            resolve_resource(dir, "rec-gens"),
            Resource::Path(PathBuf::from("data/rec-gens.json"))
        );
        assert_eq!(
            resolve_resource(dir, "other/file.json"),
            Resource::Path(PathBuf::from("other/file.json"))
        );
        assert_eq!(resolve_resource(dir, "-"), Resource::Stdin);
    }

    #[test]
    fn reads_from_any_reader() {
        let src = br#"[{"a": 1, "v x": 0.5}, {"a": 2}]"#;
        let recs = read_records(&src[..], &Resource::Stdin).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[1].len(), 1);
    }

    #[test]
    fn malformed_json_is_a_load_error() {
        let err = read_records(&b"{\"a\": 1}"[..], &Resource::Stdin).unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
        let err = read_records(&b"[{\"a\": "[..], &Resource::Stdin).unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
    }
}
