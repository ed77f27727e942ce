use super::errors::RecordError as Error;
use super::field_types::{FieldId, FieldType, HeaderFieldType};
use crate::stream::PayloadMac;
use crate::types::{Field, Item, Keychain};
use std::marker::PhantomData;

type Result<T> = std::result::Result<T, Error>;

/// Records are padded to a multiple of the cipher block size
const RECORD_ALIGN: usize = 16;
/// 4 byte length followed by 1 byte type
const RECORD_PREFIX: usize = 5;

/// Number of padding bytes after a record with a payload of `len` bytes
pub(crate) fn padding_len(len: usize) -> usize {
    (RECORD_ALIGN - (RECORD_PREFIX + len) % RECORD_ALIGN) % RECORD_ALIGN
}

/// Reads fields one at a time from decrypted data
///
/// Forward only, each byte is looked at once.
pub(crate) struct FieldParser<'a, T: FieldId> {
    _id: PhantomData<T>,
    data: &'a [u8],
}

impl<'a, T: FieldId> FieldParser<'a, T> {
    pub(crate) fn new(data: &'a [u8]) -> FieldParser<'a, T> {
        FieldParser {
            _id: PhantomData,
            data,
        }
    }

    /// Switch to reading fields of a different item type from the same position
    pub(crate) fn retype<U: FieldId>(self) -> FieldParser<'a, U> {
        FieldParser::new(self.data)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.data.len() < len {
            return Err(Error::TruncatedRecord);
        }
        let (head, tail) = self.data.split_at(len);
        self.data = tail;
        Ok(head)
    }

    /// Read the next field, feeding its payload into `mac`
    ///
    /// Returns `Ok(None)` when there is no data left at a record boundary.
    pub(crate) fn read_one_field(&mut self, mac: &mut PayloadMac) -> Result<Option<Field<T>>> {
        if self.data.is_empty() {
            return Ok(None);
        }
        let len_bytes = self.take(4)?;
        let len = u32::from_le_bytes([len_bytes[0], len_bytes[1], len_bytes[2], len_bytes[3]]);
        let len = usize::try_from(len).map_err(|_| Error::TruncatedRecord)?;
        let ty = T::from(self.take(1)?[0]);
        let payload = self.take(len)?;
        self.take(padding_len(len))?;

        mac.update(payload);
        Ok(Some(Field::new(ty, payload.to_vec())))
    }

    #[cfg(test)]
    pub(crate) fn remaining(&self) -> usize {
        self.data.len()
    }
}

/// Collect fields up to the next end marker
///
/// Returns `Ok(None)` if the data ends before the first field of the item.
pub(crate) fn read_item<T: FieldId>(
    parser: &mut FieldParser<'_, T>,
    mac: &mut PayloadMac,
) -> Result<Option<Item<T>>> {
    let mut item = Item::default();
    let mut field_count = 0usize;
    loop {
        match parser.read_one_field(mac)? {
            Some(field) if field.field_type().is_end() => return Ok(Some(item)),
            Some(field) => {
                item.add_field(field);
                field_count += 1;
            }
            None if field_count == 0 => return Ok(None),
            None => return Err(Error::MalformedItem),
        }
    }
}

/// Parse the header and every entry out of the decrypted database
pub(crate) fn read_keychain(plaintext: &[u8], mac: &mut PayloadMac) -> Result<Keychain> {
    let mut header_parser = FieldParser::<HeaderFieldType>::new(plaintext);
    let header = read_item(&mut header_parser, mac)?.ok_or(Error::MissingHeader)?;

    let mut parser = header_parser.retype::<FieldType>();
    let mut entries = Vec::new();
    while let Some(entry) = read_item(&mut parser, mac)? {
        entries.push(entry);
    }
    tracing::debug!(
        entries = entries.len(),
        header_fields = header.len(),
        "parsed records"
    );
    Ok(Keychain::new(header, entries))
}
