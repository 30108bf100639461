//! Byte-order-mark sniffing and streaming line decoding.
//!
//! MAME's `-listxml` output is UTF-16 with a BOM, LaunchBox's `MAME.xml` and
//! most `.mra` files are UTF-8 or a legacy single-byte code page. Both
//! parsers consume lines through [`DecodedLines`], which decodes
//! incrementally so the (very large) export never has to be held in memory.

use std::fs::File;
use std::io::{Chain, Cursor, ErrorKind, Read};
use std::path::Path;

use encoding_rs::{CoderResult, Decoder, DecoderResult, Encoding, UTF_8, UTF_16BE, UTF_16LE};

use crate::error::MetaError;

const CHUNK_SIZE: usize = 64 * 1024;

/// Pick the encoding announced by a BOM, or `fallback` when there is none.
pub fn detect_encoding(prefix: &[u8], fallback: &'static Encoding) -> &'static Encoding {
    match prefix {
        [0xFF, 0xFE, ..] => UTF_16LE,
        [0xFE, 0xFF, ..] => UTF_16BE,
        [0xEF, 0xBB, 0xBF, ..] => UTF_8,
        _ => fallback,
    }
}

/// Iterator over the lines of a byte stream in its detected encoding.
///
/// Line terminators (`\n` or `\r\n`) are stripped. In strict mode a
/// malformed byte sequence ends the iteration with
/// [`MetaError::MalformedText`]; otherwise it is replaced with U+FFFD.
pub struct DecodedLines<R> {
    reader: Chain<Cursor<Vec<u8>>, R>,
    encoding: &'static Encoding,
    decoder: Decoder,
    strict: bool,
    buf: Vec<u8>,
    pending: String,
    start: usize,
    consumed: u64,
    finished: bool,
    failed: bool,
    replaced: bool,
}

impl<R: Read> DecodedLines<R> {
    /// Sniff the BOM from the start of `reader` and prepare to decode it.
    /// Input without a BOM is read as UTF-8.
    pub fn new(reader: R, strict: bool) -> Result<Self, MetaError> {
        Self::with_fallback(reader, UTF_8, strict)
    }

    /// Like [`DecodedLines::new`], but input without a BOM is read as
    /// `fallback`.
    pub fn with_fallback(
        mut reader: R,
        fallback: &'static Encoding,
        strict: bool,
    ) -> Result<Self, MetaError> {
        let mut head = Vec::with_capacity(3);
        let mut byte = [0u8; 1];
        while head.len() < 3 {
            match reader.read(&mut byte) {
                Ok(0) => break,
                Ok(_) => head.push(byte[0]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        let encoding = detect_encoding(&head, fallback);
        Ok(Self {
            reader: Cursor::new(head).chain(reader),
            encoding,
            decoder: encoding.new_decoder_with_bom_removal(),
            strict,
            buf: vec![0u8; CHUNK_SIZE],
            pending: String::new(),
            start: 0,
            consumed: 0,
            finished: false,
            failed: false,
            replaced: false,
        })
    }

    /// The encoding chosen from the BOM.
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Whether any malformed input was replaced so far (lenient mode only).
    pub fn had_replacements(&self) -> bool {
        self.replaced
    }

    fn fill(&mut self) -> Result<(), MetaError> {
        let n = loop {
            match self.reader.read(&mut self.buf) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };
        let last = n == 0;
        if last {
            self.finished = true;
        }

        match decode_chunk(
            &mut self.decoder,
            &mut self.pending,
            &self.buf[..n],
            last,
            self.strict,
        ) {
            Ok(replaced) => {
                self.replaced |= replaced;
                self.consumed += n as u64;
                Ok(())
            }
            Err(read) => Err(MetaError::MalformedText {
                encoding: self.encoding.name(),
                offset: self.consumed + read as u64,
            }),
        }
    }
}

impl DecodedLines<File> {
    /// Open a file and sniff its encoding.
    pub fn open(path: &Path, strict: bool) -> Result<Self, MetaError> {
        Self::new(File::open(path)?, strict)
    }
}

impl<R: Read> Iterator for DecodedLines<R> {
    type Item = Result<String, MetaError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if let Some(len) = self.pending[self.start..].find('\n') {
                let end = self.start + len;
                let line = self.pending[self.start..end]
                    .trim_end_matches('\r')
                    .to_string();
                self.start = end + 1;
                return Some(Ok(line));
            }

            if self.finished {
                if self.start >= self.pending.len() {
                    return None;
                }
                let line = self.pending[self.start..].trim_end_matches('\r').to_string();
                self.start = self.pending.len();
                return Some(Ok(line));
            }

            self.pending.drain(..self.start);
            self.start = 0;
            if let Err(e) = self.fill() {
                self.failed = true;
                return Some(Err(e));
            }
        }
    }
}

/// Decode `src` onto the end of `dst`.
///
/// Returns whether replacement characters were emitted, or in strict mode
/// the number of bytes read before the first malformed sequence.
fn decode_chunk(
    decoder: &mut Decoder,
    dst: &mut String,
    src: &[u8],
    last: bool,
    strict: bool,
) -> Result<bool, usize> {
    let mut read_total = 0;
    let mut replaced = false;
    loop {
        let rest = &src[read_total..];
        if strict {
            let needed = decoder
                .max_utf8_buffer_length_without_replacement(rest.len())
                .unwrap_or(rest.len() * 3 + 16);
            dst.reserve(needed);
            let (result, read) = decoder.decode_to_string_without_replacement(rest, dst, last);
            read_total += read;
            match result {
                DecoderResult::InputEmpty => return Ok(false),
                DecoderResult::OutputFull => continue,
                DecoderResult::Malformed(_, _) => return Err(read_total),
            }
        } else {
            let needed = decoder
                .max_utf8_buffer_length(rest.len())
                .unwrap_or(rest.len() * 3 + 16);
            dst.reserve(needed);
            let (result, read, had_errors) = decoder.decode_to_string(rest, dst, last);
            read_total += read;
            replaced |= had_errors;
            match result {
                CoderResult::InputEmpty => return Ok(replaced),
                CoderResult::OutputFull => continue,
            }
        }
    }
}
