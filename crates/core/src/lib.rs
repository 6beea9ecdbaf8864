pub mod artifact;
pub mod batch;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod lexicon;
pub mod metrics;
pub mod parse;
pub mod pipeline;
pub mod summary;
pub mod table;
pub mod tokenize;

pub use artifact::ArticleArtifact;
pub use batch::{BatchConfig, BatchConfigBuilder, BatchRunner};
pub use error::{LexisError, Result};
pub use extract::{ExtractedArticle, extract_article};
pub use fetch::FetchConfig;
pub use fetch::{fetch_file, fetch_stdin};
pub use lexicon::{Lexicon, LexiconSources};
pub use metrics::{MetricRecord, analyze_article, is_complex, personal_pronouns, syllable_count};
pub use parse::Document;
pub use pipeline::{ArticleFetcher, ArticlePipeline, HttpArticleFetcher};
pub use summary::{ColumnStats, Summary};
pub use table::{InputRecord, OutputRow, TableFormat, read_input, read_input_from, write_csv, write_json, write_output};
pub use tokenize::{sentence_count, tokenize, words};
