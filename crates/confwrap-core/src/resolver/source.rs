use std::path::Path;

use crate::stores::backends::hive::DirectoryHive;
use crate::stores::{
    DocumentFormat, DocumentStore, EnvironmentStore, HiveStore, IniStore, ReadableStore,
    StoreError, StoreResult, WritableStore,
};

use super::handler::Resolver;
use super::types::StoreSource;

fn require_file(store: &'static str, path: &Path) -> StoreResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(StoreError::unavailable(
            store,
            format!("'{}' is not a readable file", path.display()),
        ))
    }
}

fn open_hive(path: &Path) -> StoreResult<HiveStore<DirectoryHive>> {
    if !path.is_dir() {
        return Err(StoreError::unavailable(
            "hive",
            format!("'{}' is not a directory", path.display()),
        ));
    }
    Ok(HiveStore::new(DirectoryHive::new(path)))
}

impl StoreSource {
    /// Opens the store and binds a read-only resolver to it.
    ///
    /// Documents are parsed here; INI files and hives are checked for
    /// existence and then read on every call.
    pub fn bind(&self) -> StoreResult<Resolver<Box<dyn ReadableStore>>> {
        let store: Box<dyn ReadableStore> = match self {
            StoreSource::Ini { path, options } => {
                require_file("ini", path)?;
                Box::new(IniStore::with_options(path.clone(), options.clone()))
            }
            StoreSource::Json { path, encoding } => {
                Box::new(DocumentStore::open_with(path, DocumentFormat::Json, *encoding)?)
            }
            StoreSource::Toml { path, encoding } => {
                Box::new(DocumentStore::open_with(path, DocumentFormat::Toml, *encoding)?)
            }
            StoreSource::Environment { options } => {
                Box::new(EnvironmentStore::from_process(options.clone()))
            }
            StoreSource::Hive { path } => Box::new(open_hive(path)?),
        };

        Ok(Resolver::new(store))
    }

    /// Opens the store and binds a resolver that can also write.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnsupportedOperation`] for read-only kinds.
    pub fn bind_writable(&self) -> StoreResult<Resolver<Box<dyn WritableStore>>> {
        let store: Box<dyn WritableStore> = match self {
            StoreSource::Hive { path } => Box::new(open_hive(path)?),
            other => return Err(StoreError::unsupported(other.kind(), "writes")),
        };

        Ok(Resolver::new(store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::{EnvironmentOptions, IniOptions, TextEncoding};
    use std::fs;

    #[test]
    fn test_bind_ini() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.ini");
        fs::write(&path, "[Server]\nport=8080\n").unwrap();

        let resolver = StoreSource::Ini {
            path,
            options: IniOptions::default(),
        }
        .bind()
        .unwrap();

        assert_eq!(resolver.get::<u16>("Server.port").unwrap(), 8080);
        assert_eq!(resolver.store().name(), "ini");
        resolver.close();
    }

    #[test]
    fn test_bind_missing_ini_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = StoreSource::Ini {
            path: dir.path().join("absent.ini"),
            options: IniOptions::default(),
        };
        let Err(error) = source.bind() else {
            panic!("binding a missing INI file should fail");
        };

        assert!(matches!(error, StoreError::BackendUnavailable { store: "ini", .. }));
    }

    #[test]
    fn test_bind_ini_with_encoding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.ini");
        fs::write(&path, b"[Shop]\nname=Caf\xe9\n").unwrap();

        let resolver = StoreSource::Ini {
            path,
            options: IniOptions {
                encoding: TextEncoding::latin1(),
                ..IniOptions::default()
            },
        }
        .bind()
        .unwrap();

        assert_eq!(resolver.get::<String>("Shop.name").unwrap(), "Caf\u{e9}");
    }

    #[test]
    fn test_bind_documents() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("app.json");
        fs::write(&json, r#"{"server": {"port": 8080}}"#).unwrap();
        // Format comes from the source kind, not the extension.
        let toml = dir.path().join("app.conf");
        fs::write(&toml, "[server]\nport = 9090\n").unwrap();

        let resolver = StoreSource::Json {
            path: json,
            encoding: TextEncoding::default(),
        }
        .bind()
        .unwrap();
        assert_eq!(resolver.get::<u16>("server.port").unwrap(), 8080);

        let resolver = StoreSource::Toml {
            path: toml,
            encoding: TextEncoding::default(),
        }
        .bind()
        .unwrap();
        assert_eq!(resolver.get::<u16>("server.port").unwrap(), 9090);
    }

    #[test]
    fn test_bind_malformed_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ nope").unwrap();

        let source = StoreSource::Json {
            path,
            encoding: TextEncoding::default(),
        };
        let Err(error) = source.bind() else {
            panic!("binding a malformed document should fail");
        };
        assert!(matches!(error, StoreError::MalformedSource { .. }));
    }

    #[test]
    fn test_read_only_kinds_refuse_writable_binding() {
        let source = StoreSource::Environment {
            options: EnvironmentOptions::default(),
        };
        let Err(error) = source.bind_writable() else {
            panic!("environment sources are read-only");
        };
        assert!(matches!(
            error,
            StoreError::UnsupportedOperation { store: "environment", .. }
        ));
    }

    #[test]
    fn test_writable_hive_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let source = StoreSource::Hive {
            path: dir.path().to_path_buf(),
        };

        let mut resolver = source.bind_writable().unwrap();
        resolver.set_with(r"hkcu\Software\App\port", 8080, true).unwrap();
        resolver.close();

        let resolver = source.bind().unwrap();
        assert_eq!(resolver.get::<u16>("hkcu/software/app/port").unwrap(), 8080);
        assert_eq!(
            resolver.all_keys_with_prefix(r"hkcu\Software").unwrap(),
            vec![r"hkcu\Software\App\port"]
        );
    }

    #[test]
    fn test_bind_missing_hive_directory() {
        let dir = tempfile::tempdir().unwrap();
        let source = StoreSource::Hive {
            path: dir.path().join("absent"),
        };
        assert!(source.bind().is_err());
        assert!(source.bind_writable().is_err());
    }
}
