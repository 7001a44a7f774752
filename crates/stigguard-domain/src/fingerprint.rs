use sha2::{Digest, Sha256};
use stigguard_types::{BenchmarkDescriptor, ReleaseType};

/// Compute a stable SHA-256 digest of a catalog snapshot.
///
/// Identity fields per entry, in catalog order:
/// - id
/// - technology
/// - technology role and version
/// - benchmark version (as spelled)
/// - release type
/// - title (if present)
pub fn catalog_digest(catalog: &[BenchmarkDescriptor]) -> String {
    let mut hasher = Sha256::new();
    for entry in catalog {
        let release = match entry.release_type {
            ReleaseType::Benchmark => "benchmark",
            ReleaseType::Draft => "draft",
            ReleaseType::Other => "other",
        };
        let parts = [
            entry.id.as_str(),
            entry.technology.as_str(),
            entry.technology_role.as_str(),
            entry.technology_version.as_str(),
            entry.benchmark_version.as_str(),
            release,
            entry.title.as_deref().unwrap_or(""),
        ];
        hasher.update(parts.join("|").as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}
