//! Password Safe data types

use crate::binary::{FieldId, FieldType, HeaderFieldType};
use crate::errors::PatternError;
use chrono::{DateTime, Utc};
use regex::bytes::{Regex, RegexBuilder};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;
use zeroize::Zeroizing;

#[derive(Clone, PartialEq, Eq)]
/// A single typed value of a header or entry
///
/// The raw bytes are kept as stored and wiped from memory on drop.
/// Typed accessors decode them on demand.
pub struct Field<T: FieldId> {
    ty: T,
    data: Zeroizing<Vec<u8>>,
}

impl<T: FieldId> Field<T> {
    /// Create a field from its type and raw payload
    pub fn new(ty: T, data: Vec<u8>) -> Field<T> {
        Field {
            ty,
            data: Zeroizing::new(data),
        }
    }

    /// Type of this field
    pub fn field_type(&self) -> T {
        self.ty
    }

    /// Raw payload bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Payload as text, invalid UTF-8 is replaced
    pub fn as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    /// Payload as a little endian `u16`
    pub fn as_u16(&self) -> Option<u16> {
        let bytes: [u8; 2] = self.data.as_slice().try_into().ok()?;
        Some(u16::from_le_bytes(bytes))
    }

    /// Payload as a little endian `u32`
    pub fn as_u32(&self) -> Option<u32> {
        let bytes: [u8; 4] = self.data.as_slice().try_into().ok()?;
        Some(u32::from_le_bytes(bytes))
    }

    /// Payload as a timestamp in seconds since the unix epoch
    ///
    /// Stored as 4 bytes, some writers use 8.
    pub fn as_time(&self) -> Option<DateTime<Utc>> {
        let seconds = match self.data.len() {
            4 => i64::from(self.as_u32()?),
            8 => {
                let bytes: [u8; 8] = self.data.as_slice().try_into().ok()?;
                i64::from_le_bytes(bytes)
            }
            _ => return None,
        };
        DateTime::from_timestamp(seconds, 0)
    }

    /// Payload as a 16 byte UUID
    pub fn as_uuid(&self) -> Option<Uuid> {
        Uuid::from_slice(&self.data).ok()
    }
}

impl<T: FieldId> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("ty", &self.ty)
            .field("len", &self.data.len())
            .finish()
    }
}

impl<T: FieldId> fmt::Display for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A group of fields making up the database header or one entry
///
/// Holds at most one field per type, a later field replaces an
/// earlier one of the same type.
pub struct Item<T: FieldId> {
    fields: HashMap<T, Field<T>>,
}

impl<T: FieldId> Default for Item<T> {
    fn default() -> Item<T> {
        Item {
            fields: HashMap::new(),
        }
    }
}

impl<T: FieldId> Item<T> {
    /// Add a field, replacing any existing field of the same type
    pub fn add_field(&mut self, field: Field<T>) {
        self.fields.insert(field.ty, field);
    }

    /// Find the field of a given type
    pub fn get(&self, ty: T) -> Option<&Field<T>> {
        self.fields.get(&ty)
    }

    /// Text value of the field of a given type
    pub fn text(&self, ty: T) -> Option<Cow<'_, str>> {
        self.get(ty).map(Field::as_text)
    }

    /// All fields in no particular order
    pub fn fields(&self) -> impl Iterator<Item = &Field<T>> {
        self.fields.values()
    }

    /// Number of distinct field types present
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the item has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Database metadata stored as the first item
pub type Header = Item<HeaderFieldType>;

/// A single password entry
pub type Entry = Item<FieldType>;

impl Item<HeaderFieldType> {
    /// Format version, e.g. `0x030d`
    pub fn version(&self) -> Option<u16> {
        self.get(HeaderFieldType::Version)?.as_u16()
    }

    /// Unique identifier of the database
    pub fn uuid(&self) -> Option<Uuid> {
        self.get(HeaderFieldType::Uuid)?.as_uuid()
    }

    /// Short name for the database
    pub fn database_name(&self) -> Option<Cow<'_, str>> {
        self.text(HeaderFieldType::DatabaseName)
    }

    /// Longer description of the database
    pub fn database_description(&self) -> Option<Cow<'_, str>> {
        self.text(HeaderFieldType::DatabaseDescription)
    }

    /// Time the database was last saved
    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.get(HeaderFieldType::LastSaveTime)?.as_time()
    }

    /// Application that last saved the database
    pub fn last_saved_by(&self) -> Option<Cow<'_, str>> {
        self.text(HeaderFieldType::LastSavedBy)
    }
}

impl Item<FieldType> {
    /// Name as stored, used for sorting and searching
    ///
    /// `group.title` when the entry is in a group, otherwise the title.
    /// Bytes are kept as is, so names that are not valid UTF-8 stay distinct.
    pub fn display_name_bytes(&self) -> Vec<u8> {
        let title = self.get(FieldType::Title).map_or(&[][..], Field::data);
        match self.get(FieldType::Group) {
            Some(group) => [group.data(), &b"."[..], title].concat(),
            None => title.to_vec(),
        }
    }

    /// Display name as text, invalid UTF-8 is replaced
    pub fn display_name(&self) -> String {
        let title = self.title().unwrap_or_default();
        match self.group() {
            Some(group) => format!("{}.{}", group, title),
            None => title.into_owned(),
        }
    }

    /// Return the title of this entry
    pub fn title(&self) -> Option<Cow<'_, str>> {
        self.text(FieldType::Title)
    }

    /// Return the group of this entry
    pub fn group(&self) -> Option<Cow<'_, str>> {
        self.text(FieldType::Group)
    }

    /// Return the username of this entry
    pub fn username(&self) -> Option<Cow<'_, str>> {
        self.text(FieldType::Username)
    }

    /// Return the password of this entry
    pub fn password(&self) -> Option<Cow<'_, str>> {
        self.text(FieldType::Password)
    }

    /// Return the notes of this entry
    pub fn notes(&self) -> Option<Cow<'_, str>> {
        self.text(FieldType::Notes)
    }

    /// Return the URL of this entry
    pub fn url(&self) -> Option<Cow<'_, str>> {
        self.text(FieldType::Url)
    }

    /// Return the email address of this entry
    pub fn email(&self) -> Option<Cow<'_, str>> {
        self.text(FieldType::EmailAddress)
    }

    /// Identifier for this entry
    pub fn uuid(&self) -> Option<Uuid> {
        self.get(FieldType::Uuid)?.as_uuid()
    }

    /// Time the entry was created
    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.get(FieldType::CreationTime)?.as_time()
    }

    /// Time the entry was last changed
    pub fn modified(&self) -> Option<DateTime<Utc>> {
        self.get(FieldType::LastModificationTime)?.as_time()
    }

    /// Time the entry was last viewed
    pub fn last_accessed(&self) -> Option<DateTime<Utc>> {
        self.get(FieldType::LastAccessTime)?.as_time()
    }

    /// Time at which the password needs rotation
    pub fn password_expiry(&self) -> Option<DateTime<Utc>> {
        self.get(FieldType::PasswordExpiryTime)?.as_time()
    }

    /// Action code for double click
    pub fn double_click_action(&self) -> Option<u16> {
        self.get(FieldType::DoubleClickAction)?.as_u16()
    }

    /// Whether the entry is marked read only
    pub fn is_protected(&self) -> bool {
        self.get(FieldType::ProtectedEntry)
            .and_then(|f| f.data().first().copied())
            .map_or(false, |b| b != 0 && b != b'0')
    }
}

impl fmt::Display for Item<FieldType> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Decrypted and verified database contents
///
/// Entries are sorted by display name, entries with the same name
/// keep the order they were stored in.
pub struct Keychain {
    header: Header,
    entries: Vec<Entry>,
}

impl Keychain {
    pub(crate) fn new(header: Header, mut entries: Vec<Entry>) -> Keychain {
        entries.sort_by_cached_key(Entry::display_name_bytes);
        Keychain { header, entries }
    }

    /// Database metadata, never part of the entry list
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// All entries in display name order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the database has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose display name matches a case insensitive regex
    ///
    /// ```
    /// # fn search(keychain: &psafe3_rs::Keychain) -> Result<(), psafe3_rs::errors::PatternError> {
    /// for entry in keychain.find("^work\\.")? {
    ///     println!("{}", entry);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn find(&self, pattern: &str) -> Result<Matches<'_>, PatternError> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Matches {
            regex,
            entries: self.entries.iter(),
        })
    }
}

#[derive(Debug, Clone)]
/// Iterator over the entries matched by [`Keychain::find`]
pub struct Matches<'a> {
    regex: Regex,
    entries: std::slice::Iter<'a, Entry>,
}

impl<'a> Iterator for Matches<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<&'a Entry> {
        let regex = &self.regex;
        self.entries
            .by_ref()
            .find(|entry| regex.is_match(&entry.display_name_bytes()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.entries.size_hint().1)
    }
}
