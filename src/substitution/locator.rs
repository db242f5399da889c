//! Package location lookups

use crate::error::LocateError;
use lru::LruCache;
use std::{
    collections::HashMap,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    process::{Child, Command, Output, Stdio},
    sync::Mutex,
    thread,
    time::{Duration, Instant},
};

/// Maps a package name to its install directory
pub trait PackageLocator: Send + Sync {
    fn locate(&self, package: &str) -> Result<PathBuf, LocateError>;
}

impl<L: PackageLocator + ?Sized> PackageLocator for Box<L> {
    fn locate(&self, package: &str) -> Result<PathBuf, LocateError> {
        (**self).locate(package)
    }
}

/// In-memory package table
#[derive(Debug, Clone, Default)]
pub struct StaticLocator {
    packages: HashMap<String, PathBuf>,
}

impl StaticLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.insert(name, path);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.packages.insert(name.into(), path.into());
    }
}

impl<K: Into<String>, V: Into<PathBuf>> FromIterator<(K, V)> for StaticLocator {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut locator = Self::new();
        for (name, path) in iter {
            locator.insert(name, path);
        }
        locator
    }
}

impl PackageLocator for StaticLocator {
    fn locate(&self, package: &str) -> Result<PathBuf, LocateError> {
        self.packages
            .get(package)
            .cloned()
            .ok_or_else(|| LocateError::PackageNotFound(package.to_string()))
    }
}

/// Asks `rospack find <package>`
#[derive(Debug, Clone)]
pub struct RospackLocator {
    program: String,
    timeout: Option<Duration>,
}

const POLL_INTERVAL: Duration = Duration::from_millis(10);

impl RospackLocator {
    pub fn new() -> Self {
        Self::with_program("rospack")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    /// Kill the lookup process if it runs longer than `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn run(&self, package: &str, command: &str) -> Result<Output, LocateError> {
        let failed = |message: String| LocateError::CommandFailed {
            command: command.to_string(),
            message,
        };

        let child = Command::new(&self.program)
            .arg("find")
            .arg(package)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| failed(e.to_string()))?;

        match self.timeout {
            Some(limit) => wait_with_deadline(child, limit).map_err(failed),
            None => child.wait_with_output().map_err(|e| failed(e.to_string())),
        }
    }
}

fn wait_with_deadline(mut child: Child, limit: Duration) -> Result<Output, String> {
    let started = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(_)) => return child.wait_with_output().map_err(|e| e.to_string()),
            Ok(None) if started.elapsed() >= limit => {
                // the process may have exited in the meantime
                let _ = child.kill();
                let _ = child.wait();
                return Err(format!("timed out after {:?}", limit));
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => return Err(e.to_string()),
        }
    }
}

impl Default for RospackLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageLocator for RospackLocator {
    fn locate(&self, package: &str) -> Result<PathBuf, LocateError> {
        let command = format!("{} find {}", self.program, package);
        log::debug!("Running `{}`", command);

        let output = self.run(package, &command)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("not found") || output.stdout.is_empty() {
                return Err(LocateError::PackageNotFound(package.to_string()));
            }
            return Err(LocateError::CommandFailed {
                command,
                message: format!("{}: {}", output.status, stderr.trim()),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        match stdout.lines().next().map(str::trim_end) {
            Some(line) if !line.is_empty() => Ok(PathBuf::from(line)),
            _ => Err(LocateError::PackageNotFound(package.to_string())),
        }
    }
}

/// Searches package roots taken from the ROS environment
#[derive(Debug, Clone, Default)]
pub struct EnvPrefixLocator {
    roots: Vec<PathBuf>,
}

impl EnvPrefixLocator {
    /// Roots from `ROS_PACKAGE_PATH`, `AMENT_PREFIX_PATH` and `ROS_DISTRO`, in
    /// that order
    pub fn from_env() -> Self {
        let mut roots = Vec::new();

        if let Ok(package_path) = std::env::var("ROS_PACKAGE_PATH") {
            roots.extend(split_path_list(&package_path).map(PathBuf::from));
        }

        if let Ok(prefix_path) = std::env::var("AMENT_PREFIX_PATH") {
            roots.extend(split_path_list(&prefix_path).map(|p| Path::new(p).join("share")));
        }

        if let Ok(distro) = std::env::var("ROS_DISTRO") {
            roots.push(PathBuf::from(format!("/opt/ros/{}/share", distro)));
        }

        log::debug!("Package search roots: {:?}", roots);
        Self { roots }
    }

    pub fn with_roots(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }
}

fn split_path_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(':').filter(|p| !p.is_empty())
}

impl PackageLocator for EnvPrefixLocator {
    fn locate(&self, package: &str) -> Result<PathBuf, LocateError> {
        self.roots
            .iter()
            .map(|root| root.join(package))
            .find(|candidate| candidate.is_dir())
            .ok_or_else(|| LocateError::PackageNotFound(package.to_string()))
    }
}

/// Tries each locator in turn; the first hit wins
#[derive(Default)]
pub struct ChainLocator {
    locators: Vec<Box<dyn PackageLocator>>,
}

impl ChainLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<L: PackageLocator + 'static>(mut self, locator: L) -> Self {
        self.locators.push(Box::new(locator));
        self
    }
}

impl PackageLocator for ChainLocator {
    fn locate(&self, package: &str) -> Result<PathBuf, LocateError> {
        let mut last_error = LocateError::PackageNotFound(package.to_string());
        for locator in &self.locators {
            match locator.locate(package) {
                Ok(path) => return Ok(path),
                Err(e) => last_error = e,
            }
        }
        Err(last_error)
    }
}

/// Memoizes successful lookups of another locator
pub struct CachingLocator<L> {
    inner: L,
    cache: Mutex<LruCache<String, PathBuf>>,
}

const DEFAULT_CACHE_SIZE: usize = 256;

impl<L: PackageLocator> CachingLocator<L> {
    pub fn new(inner: L) -> Self {
        let capacity = NonZeroUsize::new(DEFAULT_CACHE_SIZE).unwrap_or(NonZeroUsize::MIN);
        Self::with_capacity(inner, capacity)
    }

    pub fn with_capacity(inner: L, capacity: NonZeroUsize) -> Self {
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }
}

impl<L: PackageLocator> PackageLocator for CachingLocator<L> {
    fn locate(&self, package: &str) -> Result<PathBuf, LocateError> {
        {
            let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(path) = cache.get(package) {
                log::trace!("Package cache hit: {}", package);
                return Ok(path.clone());
            }
        }

        let path = self.inner.locate(package)?;
        self.cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .put(package.to_string(), path.clone());
        Ok(path)
    }
}
