//! Contains the [`Metadata`] struct which comes at the beginning of any DBN file
//! or stream, and [`MetadataBuilder`] for creating a [`Metadata`] with defaults.

use crate::{
    enums::{SType, Schema},
    record::ts_to_dt,
};

/// Information about the data contained in a DBN file or stream. DBN requires
/// the metadata to be included at the start of the encoded data.
///
/// The time range and limit fields hold the raw on-wire values, sentinels
/// included, so that a provisional header written by a streaming writer
/// round-trips bit-identically. The accessor methods translate the sentinels to
/// optional values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    /// The DBN schema version number, 2 or 3. Newly-encoded files use
    /// [`DBN_VERSION`](crate::DBN_VERSION) unless overridden.
    pub version: u8,
    /// The dataset code.
    pub dataset: String,
    /// The data record schema. Specifies which record types are in the DBN
    /// stream. `None` indicates the stream _may_ contain more than one record
    /// type.
    pub schema: Option<Schema>,
    /// The UNIX nanosecond timestamp of the query start, or the first record if
    /// the file was split. `i64::MAX` in a provisional header that was never
    /// finalized.
    pub start: i64,
    /// The UNIX nanosecond timestamp of the query end, or the last record if the
    /// file was split. `0` when unset.
    pub end: i64,
    /// The maximum number of records for the query, or the total record count
    /// written by a finalized streaming writer. `0` means unlimited or unknown.
    pub limit: u64,
    /// The input symbology type to map from. `None` indicates a mix, such as in
    /// the case of live data.
    pub stype_in: Option<SType>,
    /// The output symbology type to map to.
    pub stype_out: SType,
    /// `true` if this store contains live data with send timestamps appended to
    /// each record.
    pub ts_out: bool,
    /// The length in bytes of fixed-length symbol strings, including a null
    /// terminator byte.
    pub symbol_cstr_len: usize,
    /// The original query input symbols from the request.
    pub symbols: Vec<String>,
    /// Symbols that did not resolve for _at least one day_ in the query time
    /// range.
    pub partial: Vec<String>,
    /// Symbols that did not resolve for _any_ day in the query time range.
    pub not_found: Vec<String>,
    /// Symbol mappings containing a raw symbol and its resolution for an
    /// interval within the query range.
    pub mappings: Vec<SymbolMapping>,
}

/// A raw symbol, its resolved symbol, and the time interval the resolution
/// applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolMapping {
    /// The `stype_in` symbol.
    pub raw_symbol: String,
    /// The resolved `stype_out` symbol.
    pub symbol_out: String,
    /// The start of the mapping interval expressed as the number of nanoseconds
    /// since the UNIX epoch (inclusive).
    pub start_ts: i64,
    /// The end of the mapping interval expressed as the number of nanoseconds
    /// since the UNIX epoch (exclusive).
    pub end_ts: i64,
}

impl Metadata {
    /// Creates a builder for building a `Metadata` instance.
    pub fn builder() -> MetadataBuilder {
        MetadataBuilder::new()
    }

    /// Parses the raw query start into a datetime. Returns `None` if `start`
    /// holds the provisional sentinel of an unfinalized header.
    pub fn start(&self) -> Option<time::OffsetDateTime> {
        ts_to_dt(self.start)
    }

    /// Parses the raw query end into a datetime. Returns `None` if the end time
    /// was never set.
    pub fn end(&self) -> Option<time::OffsetDateTime> {
        if self.end == 0 {
            None
        } else {
            ts_to_dt(self.end)
        }
    }

    /// Returns the record limit or finalized record count. Returns `None` when
    /// the count is unknown or the query was unlimited.
    pub fn record_count(&self) -> Option<u64> {
        (self.limit != 0).then_some(self.limit)
    }
}

/// Helper for constructing [`Metadata`] structs with defaults.
#[derive(Debug, Clone)]
pub struct MetadataBuilder {
    version: u8,
    dataset: String,
    schema: Option<Schema>,
    start: i64,
    end: i64,
    limit: u64,
    stype_in: Option<SType>,
    stype_out: SType,
    ts_out: bool,
    symbols: Vec<String>,
    partial: Vec<String>,
    not_found: Vec<String>,
    mappings: Vec<SymbolMapping>,
}

impl MetadataBuilder {
    /// Creates a new builder with the current DBN version and empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets [`version`](Metadata::version) and returns the builder.
    pub fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    /// Sets [`dataset`](Metadata::dataset) and returns the builder.
    pub fn dataset(mut self, dataset: impl ToString) -> Self {
        self.dataset = dataset.to_string();
        self
    }

    /// Sets [`schema`](Metadata::schema) and returns the builder.
    pub fn schema(mut self, schema: Option<Schema>) -> Self {
        self.schema = schema;
        self
    }

    /// Sets [`start`](Metadata::start) and returns the builder.
    pub fn start(mut self, start: i64) -> Self {
        self.start = start;
        self
    }

    /// Sets [`end`](Metadata::end) and returns the builder.
    pub fn end(mut self, end: i64) -> Self {
        self.end = end;
        self
    }

    /// Sets [`limit`](Metadata::limit) and returns the builder.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Sets [`stype_in`](Metadata::stype_in) and returns the builder.
    pub fn stype_in(mut self, stype_in: Option<SType>) -> Self {
        self.stype_in = stype_in;
        self
    }

    /// Sets [`stype_out`](Metadata::stype_out) and returns the builder.
    pub fn stype_out(mut self, stype_out: SType) -> Self {
        self.stype_out = stype_out;
        self
    }

    /// Sets [`ts_out`](Metadata::ts_out) and returns the builder.
    pub fn ts_out(mut self, ts_out: bool) -> Self {
        self.ts_out = ts_out;
        self
    }

    /// Sets [`symbols`](Metadata::symbols) and returns the builder.
    pub fn symbols(mut self, symbols: Vec<String>) -> Self {
        self.symbols = symbols;
        self
    }

    /// Sets [`partial`](Metadata::partial) and returns the builder.
    pub fn partial(mut self, partial: Vec<String>) -> Self {
        self.partial = partial;
        self
    }

    /// Sets [`not_found`](Metadata::not_found) and returns the builder.
    pub fn not_found(mut self, not_found: Vec<String>) -> Self {
        self.not_found = not_found;
        self
    }

    /// Sets [`mappings`](Metadata::mappings) and returns the builder.
    pub fn mappings(mut self, mappings: Vec<SymbolMapping>) -> Self {
        self.mappings = mappings;
        self
    }

    /// Constructs the [`Metadata`] object.
    pub fn build(self) -> Metadata {
        Metadata {
            version: self.version,
            dataset: self.dataset,
            schema: self.schema,
            start: self.start,
            end: self.end,
            limit: self.limit,
            stype_in: self.stype_in,
            stype_out: self.stype_out,
            ts_out: self.ts_out,
            symbol_cstr_len: crate::SYMBOL_CSTR_LEN,
            symbols: self.symbols,
            partial: self.partial,
            not_found: self.not_found,
            mappings: self.mappings,
        }
    }
}

impl Default for MetadataBuilder {
    fn default() -> Self {
        Self {
            version: crate::DBN_VERSION,
            dataset: String::new(),
            schema: None,
            start: 0,
            end: 0,
            limit: 0,
            stype_in: None,
            stype_out: SType::InstrumentId,
            ts_out: false,
            symbols: vec![],
            partial: vec![],
            not_found: vec![],
            mappings: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let metadata = Metadata::builder()
            .dataset("GLBX.MDP3")
            .schema(Some(Schema::Mbo))
            .start(1657230820000000000)
            .stype_in(Some(SType::RawSymbol))
            .stype_out(SType::InstrumentId)
            .build();
        assert_eq!(metadata.version, crate::DBN_VERSION);
        assert_eq!(metadata.symbol_cstr_len, crate::SYMBOL_CSTR_LEN);
        assert_eq!(metadata.end, 0);
        assert!(metadata.end().is_none());
        assert!(metadata.record_count().is_none());
    }

    #[test]
    fn test_sentinel_accessors() {
        let metadata = Metadata::builder()
            .start(crate::UNDEF_TIMESTAMP)
            .end(1658960170000000000)
            .limit(5)
            .build();
        assert!(metadata.start().is_none());
        assert!(metadata.end().is_some());
        assert_eq!(metadata.record_count(), Some(5));
    }
}
