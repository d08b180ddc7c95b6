//! Streaming normalization for large chat exports.
//!
//! [`RecordStream`] reads an export line by line and yields records as soon
//! as each line is classified, so memory use does not grow with file size.
//! Lines are still processed strictly in order: the carried date from one
//! line is visible to the next.
//!
//! # Example
//!
//! ```rust,no_run
//! use kakaopack::normalizer::LogNormalizer;
//! use std::path::Path;
//!
//! let normalizer = LogNormalizer::new();
//! let mut stream = normalizer.stream_file(Path::new("KakaoTalk_Chat.txt"))?;
//!
//! while let Some(result) = stream.next() {
//!     let record = result?;
//!     println!("{} {}: {}", record.date_string(), record.sender, record.message);
//!
//!     if let Some(pct) = stream.progress() {
//!         eprint!("\r{:.1}%", pct);
//!     }
//! }
//! # Ok::<(), kakaopack::KakaopackError>(())
//! ```
//!
//! # Memory Usage
//!
//! | Approach | 100MB export | 1GB export |
//! |----------|--------------|------------|
//! | `normalize_file` | ~300MB RAM | ~3GB RAM |
//! | `RecordStream` | one line + read buffer | one line + read buffer |

mod reader;

pub use reader::RecordStream;
