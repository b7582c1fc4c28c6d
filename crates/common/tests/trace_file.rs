use common::utils::logging::{init_logging_with_trace, TRACE_TARGET};
use tracing::info;

#[test]
fn trace_events_are_appended_to_file() -> anyhow::Result<()> {
    let dir = std::env::temp_dir().join(format!("trace_file_{}", uuid::Uuid::new_v4()));
    let path = dir.join("crud.log");
    std::fs::create_dir_all(&dir)?;
    std::fs::write(&path, "previous line\n")?;

    init_logging_with_trace(false, &path)?;
    info!(target: TRACE_TARGET, body = "{\"Id\": 1}", "request");
    info!("console only");

    let content = std::fs::read_to_string(&path)?;
    assert!(content.starts_with("previous line\n"), "file must be appended, got {content:?}");
    assert!(content.contains("request"));
    assert!(content.contains(TRACE_TARGET));
    assert!(!content.contains("console only"));

    let _ = std::fs::remove_dir_all(&dir);
    Ok(())
}
