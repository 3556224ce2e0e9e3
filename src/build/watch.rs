use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::build::{DocumentBuilder, DocumentChange, DurationProbe};
use crate::error::{MediaError, Result};
use crate::model::VideoProject;

/// Signals an edit each time the watched project file changes
///
/// The parent directory is watched so editors that replace the file on save
/// are still noticed.
pub struct ProjectWatcher {
    _watcher: RecommendedWatcher,
    edits: UnboundedSender<()>,
}

impl ProjectWatcher {
    pub fn new(path: &Path) -> Result<(Self, UnboundedReceiver<()>)> {
        let (tx, rx) = mpsc::unbounded_channel();
        let file_name = path.file_name().map(|name| name.to_os_string());
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let events = tx.clone();
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if touches(&event, file_name.as_deref()) => {
                    let _ = events.send(());
                }
                Ok(_) => {}
                Err(e) => warn!("Watch error: {}", e),
            },
            Config::default(),
        )
        .map_err(MediaError::Watch)?;

        watcher
            .watch(&directory, RecursiveMode::NonRecursive)
            .map_err(MediaError::Watch)?;
        debug!("Watching {}", directory.display());

        Ok((Self { _watcher: watcher, edits: tx }, rx))
    }

    /// Request a build as if the file had been edited
    pub fn touch(&self) {
        let _ = self.edits.send(());
    }
}

fn touches(event: &Event, file_name: Option<&std::ffi::OsStr>) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event
            .paths
            .iter()
            .any(|path| path.file_name().is_some() && path.file_name() == file_name)
}

/// Wait until no edit arrives for `window`; true when the sender side is gone
async fn wait_for_quiet(edits: &mut UnboundedReceiver<()>, window: Duration) -> bool {
    loop {
        match tokio::time::timeout(window, edits.recv()).await {
            Ok(Some(())) => continue,
            Ok(None) => return true,
            Err(_) => return false,
        }
    }
}

/// Run `build` once per burst of edits
///
/// A build starts after `window` without edits. Edits arriving while a build
/// runs are only recorded; however many there were, they cause exactly one
/// follow-up build. Returns the number of builds once the edit channel closes.
pub async fn debounce_builds<F, Fut>(
    mut edits: UnboundedReceiver<()>,
    window: Duration,
    mut build: F,
) -> usize
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    let mut builds = 0;
    let mut pending = false;

    loop {
        if !pending && edits.recv().await.is_none() {
            break;
        }

        let mut closed = wait_for_quiet(&mut edits, window).await;
        build().await;
        builds += 1;

        pending = false;
        while !closed {
            match edits.try_recv() {
                Ok(()) => pending = true,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => closed = true,
            }
        }

        if closed {
            if pending {
                build().await;
                builds += 1;
            }
            break;
        }
    }

    builds
}

async fn rebuild<P: DurationProbe>(builder: &DocumentBuilder<P>, path: &Path) -> Result<DocumentChange> {
    let content = tokio::fs::read_to_string(path).await?;
    let project = VideoProject::from_json_str(&content)?;
    builder
        .build(&format!("file://{}", path.display()), &project)
        .await
}

/// Rebuild `path` after every burst of edits and send each result to `changes`
///
/// Builds once at start. Unreadable or malformed documents are logged and
/// skipped; the next edit tries again.
pub async fn watch_project<P: DurationProbe>(
    path: PathBuf,
    builder: Arc<DocumentBuilder<P>>,
    debounce: Duration,
    changes: UnboundedSender<DocumentChange>,
) -> Result<()> {
    let (watcher, edits) = ProjectWatcher::new(&path)?;
    watcher.touch();
    info!("Watching {} for changes", path.display());

    debounce_builds(edits, debounce, || {
        let builder = Arc::clone(&builder);
        let path = path.clone();
        let changes = changes.clone();
        async move {
            match rebuild(&builder, &path).await {
                Ok(change) => {
                    let _ = changes.send(change);
                }
                Err(e) => warn!("Build of {} failed: {}", path.display(), e.user_message()),
            }
        }
    })
    .await;

    Ok(())
}
