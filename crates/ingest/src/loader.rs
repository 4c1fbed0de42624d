//! Asynchronous invoice loading.
//!
//! Each file is read and parsed on its own task. Results come back in
//! completion order, which is not the order the paths were given in.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tokio::task::{self, JoinSet};

use scancheck_core::InvoiceId;
use scancheck_invoicing::Invoice;

use crate::csv_invoice::parse_invoice;
use crate::error::IngestError;

/// Invoice identifier for a source file: its file name.
pub fn invoice_id_for(path: &Path) -> Result<InvoiceId, IngestError> {
    path.file_name()
        .map(|name| InvoiceId::new(name.to_string_lossy()))
        .ok_or_else(|| IngestError::MissingFileName {
            path: path.to_path_buf(),
        })
}

/// Read and parse a single CSV invoice file.
pub async fn load_invoice(path: PathBuf) -> Result<Invoice, IngestError> {
    let id = invoice_id_for(&path)?;
    let data = tokio::fs::read(&path).await.map_err(|source| IngestError::Io {
        path: path.clone(),
        source,
    })?;
    parse_invoice(id, &path, data.as_slice())
}

/// Load every path concurrently, one task per file.
///
/// The returned results are in completion order.
pub async fn load_invoices<I, P>(paths: I) -> Vec<Result<Invoice, IngestError>>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let mut tasks = JoinSet::new();
    let mut paths_by_task = HashMap::new();
    for path in paths {
        let path: PathBuf = path.into();
        let handle = tasks.spawn(load_invoice(path.clone()));
        paths_by_task.insert(handle.id(), path);
    }
    collect_loads(tasks, paths_by_task).await
}

async fn collect_loads(
    mut tasks: JoinSet<Result<Invoice, IngestError>>,
    mut paths_by_task: HashMap<task::Id, PathBuf>,
) -> Vec<Result<Invoice, IngestError>> {
    let mut results = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next_with_id().await {
        let result = match joined {
            Ok((id, result)) => {
                if let Err(err) = &result {
                    let path = paths_by_task.remove(&id).unwrap_or_default();
                    tracing::warn!(path = %path.display(), error = %err, "invoice file rejected");
                }
                result
            }
            Err(join_err) => {
                let path = paths_by_task.remove(&join_err.id()).unwrap_or_default();
                tracing::error!(path = %path.display(), error = %join_err, "invoice load task failed");
                Err(IngestError::Task {
                    path,
                    message: join_err.to_string(),
                })
            }
        };
        results.push(result);
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn identifier_is_file_name() {
        let id = invoice_id_for(Path::new("/tmp/drop/march-2024.csv")).unwrap();
        assert_eq!(id.as_str(), "march-2024.csv");
        assert!(invoice_id_for(Path::new("/")).is_err());
    }

    #[tokio::test]
    async fn loads_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        fs::write(&a, "ean,quantity\n1111111111111,1\n").unwrap();
        fs::write(&b, "ean,quantity\n1111111111111,2\n2222222222222,1\n").unwrap();

        let results = load_invoices([a, b]).await;

        let mut loaded: Vec<_> = results
            .into_iter()
            .map(|r| {
                let invoice = r.unwrap();
                (invoice.id_typed().as_str().to_string(), invoice.items().len())
            })
            .collect();
        loaded.sort();
        assert_eq!(loaded, vec![("a.csv".to_string(), 1), ("b.csv".to_string(), 2)]);
    }

    #[tokio::test]
    async fn one_bad_file_does_not_stop_the_others() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.csv");
        fs::write(&good, "ean,quantity\n1111111111111,1\n").unwrap();
        let missing = dir.path().join("missing.csv");

        let results = load_invoices([good, missing.clone()]).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        let err = results.into_iter().find_map(Result::err).unwrap();
        assert!(matches!(err, IngestError::Io { .. }));
        assert_eq!(err.path(), missing.as_path());
    }

    #[tokio::test]
    async fn panicked_task_keeps_its_path() {
        let mut tasks = JoinSet::new();
        let handle = tasks.spawn(async {
            if true {
                panic!("parser blew up");
            }
            load_invoice(PathBuf::from("unreachable.csv")).await
        });
        let path = PathBuf::from("/drop/broken.csv");
        let paths_by_task = HashMap::from([(handle.id(), path.clone())]);

        let results = collect_loads(tasks, paths_by_task).await;

        assert_eq!(results.len(), 1);
        let err = results.into_iter().next().unwrap().unwrap_err();
        assert!(matches!(err, IngestError::Task { .. }));
        assert_eq!(err.path(), path.as_path());
        assert!(err.to_string().starts_with("/drop/broken.csv: load task failed"));
    }
}
