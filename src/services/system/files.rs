//! 存储目录下生成文件（收据、报表、证明）的读取

use std::path::{Component, Path, PathBuf};

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use tracing::error;

use crate::config::AppConfig;
use crate::errors::EduManageError;
use crate::models::{ApiResponse, ErrorCode};

/// 只接受存储目录内的相对路径，拒绝 `..` 与绝对路径
pub fn resolve_storage_path(root: &Path, requested: &str) -> Option<PathBuf> {
    let relative = Path::new(requested);
    let mut resolved = root.to_path_buf();
    let mut has_part = false;
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                resolved.push(part);
                has_part = true;
            }
            Component::CurDir => {}
            _ => return None,
        }
    }
    has_part.then_some(resolved)
}

pub fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// 读取结果；越界路径与目录都按不存在处理
#[derive(Debug)]
pub enum StorageRead {
    Found(PathBuf, Vec<u8>),
    Missing,
    Failed(String),
}

pub async fn read_storage_file(root: &Path, requested: &str) -> StorageRead {
    let Some(path) = resolve_storage_path(root, requested) else {
        return StorageRead::Missing;
    };
    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return StorageRead::Missing,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return StorageRead::Missing,
        Err(e) => return StorageRead::Failed(format!("{e:?}")),
    }
    match tokio::fs::read(&path).await {
        Ok(buf) => StorageRead::Found(path, buf),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => StorageRead::Missing,
        Err(e) => StorageRead::Failed(format!("{e:?}")),
    }
}

pub async fn serve_storage_file(
    file_path: String,
    _request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let root = AppConfig::get().storage.root();

    let (path, buf) = match read_storage_file(&root, &file_path).await {
        StorageRead::Found(path, buf) => (path, buf),
        StorageRead::Missing => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StorageFileNotFound,
                "File not found",
            )));
        }
        StorageRead::Failed(reason) => {
            error!("{:?}", EduManageError::file_operation(reason));
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "File read failed",
                )),
            );
        }
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, content_type_for(&path)))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{file_name}\""),
        ))
        .body(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_inside_root() {
        let root = Path::new("storage");
        assert_eq!(
            resolve_storage_path(root, "receipts/receipt_1.pdf"),
            Some(PathBuf::from("storage/receipts/receipt_1.pdf"))
        );
        assert_eq!(
            resolve_storage_path(root, "./reports/r.pdf"),
            Some(PathBuf::from("storage/reports/r.pdf"))
        );
    }

    #[test]
    fn test_reject_traversal() {
        let root = Path::new("storage");
        assert_eq!(resolve_storage_path(root, "../Cargo.toml"), None);
        assert_eq!(resolve_storage_path(root, "receipts/../../etc/passwd"), None);
        assert_eq!(resolve_storage_path(root, "/etc/passwd"), None);
        assert_eq!(resolve_storage_path(root, ""), None);
    }

    #[tokio::test]
    async fn test_read_storage_file() {
        let dir = tempfile::tempdir().unwrap();
        let receipts = dir.path().join("receipts");
        std::fs::create_dir_all(&receipts).unwrap();
        std::fs::write(receipts.join("receipt_1.pdf"), b"%PDF-1.3").unwrap();

        match read_storage_file(dir.path(), "receipts/receipt_1.pdf").await {
            StorageRead::Found(path, buf) => {
                assert!(path.ends_with("receipt_1.pdf"));
                assert_eq!(buf, b"%PDF-1.3");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            read_storage_file(dir.path(), "receipts").await,
            StorageRead::Missing
        ));
        assert!(matches!(
            read_storage_file(dir.path(), "receipts/receipt_2.pdf").await,
            StorageRead::Missing
        ));
        assert!(matches!(
            read_storage_file(dir.path(), "../etc/passwd").await,
            StorageRead::Missing
        ));
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type_for(Path::new("a/b.PDF")), "application/pdf");
        assert_eq!(content_type_for(Path::new("a/b.bin")), "application/octet-stream");
    }
}
