use std::fmt::Debug;
use std::hash::Hash;

/// Type identifier of a record field
///
/// Database header and entries share the record layout but give
/// type bytes different meanings, so each has its own identifier.
pub trait FieldId: From<u8> + Into<u8> + Copy + Eq + Hash + Debug {
    /// Whether this type terminates the current item
    fn is_end(&self) -> bool;
}

/// Type byte that terminates an item, for both headers and entries
pub const END_OF_ITEM: u8 = 0xff;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
/// Field types for password entries
pub enum FieldType {
    /// Unique identifier of the entry
    Uuid,
    /// Dotted group path the entry is filed under
    Group,
    /// Entry title
    Title,
    /// Login name
    Username,
    /// Free form notes
    Notes,
    /// The password itself
    Password,
    /// Time the entry was created
    CreationTime,
    /// Time the password was last changed
    PasswordModificationTime,
    /// Time the entry was last viewed
    LastAccessTime,
    /// Time at which the password needs rotation
    PasswordExpiryTime,
    /// Time any field of the entry was last changed
    LastModificationTime,
    /// Website address
    Url,
    /// Autotype sequence
    Autotype,
    /// Encoded list of previous passwords
    PasswordHistory,
    /// Encoded password generation policy
    PasswordPolicy,
    /// Days after which the password expires
    PasswordExpiryInterval,
    /// Command run from the entry
    RunCommand,
    /// Action on double click
    DoubleClickAction,
    /// Email address
    EmailAddress,
    /// Whether the entry is protected from edits
    ProtectedEntry,
    /// Symbols to use when generating a password
    OwnSymbolsForPassword,
    /// Action on shift + double click
    ShiftDoubleClickAction,
    /// Name of a shared password policy
    PasswordPolicyName,
    /// Last field of an entry
    End,
    /// Some field not supported by this library
    Unknown(u8),
}

impl From<u8> for FieldType {
    fn from(id: u8) -> FieldType {
        match id {
            0x01 => FieldType::Uuid,
            0x02 => FieldType::Group,
            0x03 => FieldType::Title,
            0x04 => FieldType::Username,
            0x05 => FieldType::Notes,
            0x06 => FieldType::Password,
            0x07 => FieldType::CreationTime,
            0x08 => FieldType::PasswordModificationTime,
            0x09 => FieldType::LastAccessTime,
            0x0a => FieldType::PasswordExpiryTime,
            0x0c => FieldType::LastModificationTime,
            0x0d => FieldType::Url,
            0x0e => FieldType::Autotype,
            0x0f => FieldType::PasswordHistory,
            0x10 => FieldType::PasswordPolicy,
            0x11 => FieldType::PasswordExpiryInterval,
            0x12 => FieldType::RunCommand,
            0x13 => FieldType::DoubleClickAction,
            0x14 => FieldType::EmailAddress,
            0x15 => FieldType::ProtectedEntry,
            0x16 => FieldType::OwnSymbolsForPassword,
            0x17 => FieldType::ShiftDoubleClickAction,
            0x18 => FieldType::PasswordPolicyName,
            END_OF_ITEM => FieldType::End,
            x => FieldType::Unknown(x),
        }
    }
}

impl From<FieldType> for u8 {
    fn from(ty: FieldType) -> u8 {
        match ty {
            FieldType::Uuid => 0x01,
            FieldType::Group => 0x02,
            FieldType::Title => 0x03,
            FieldType::Username => 0x04,
            FieldType::Notes => 0x05,
            FieldType::Password => 0x06,
            FieldType::CreationTime => 0x07,
            FieldType::PasswordModificationTime => 0x08,
            FieldType::LastAccessTime => 0x09,
            FieldType::PasswordExpiryTime => 0x0a,
            FieldType::LastModificationTime => 0x0c,
            FieldType::Url => 0x0d,
            FieldType::Autotype => 0x0e,
            FieldType::PasswordHistory => 0x0f,
            FieldType::PasswordPolicy => 0x10,
            FieldType::PasswordExpiryInterval => 0x11,
            FieldType::RunCommand => 0x12,
            FieldType::DoubleClickAction => 0x13,
            FieldType::EmailAddress => 0x14,
            FieldType::ProtectedEntry => 0x15,
            FieldType::OwnSymbolsForPassword => 0x16,
            FieldType::ShiftDoubleClickAction => 0x17,
            FieldType::PasswordPolicyName => 0x18,
            FieldType::End => END_OF_ITEM,
            FieldType::Unknown(x) => x,
        }
    }
}

impl FieldId for FieldType {
    fn is_end(&self) -> bool {
        *self == FieldType::End
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
/// Field types for the database header
pub enum HeaderFieldType {
    /// Format version, major version in the high byte
    Version,
    /// Unique identifier of the database
    Uuid,
    /// Preferences that differ from the application defaults
    NonDefaultPreferences,
    /// Which groups were expanded in the tree view
    TreeDisplayStatus,
    /// Time the database was last saved
    LastSaveTime,
    /// Application that last saved the database
    LastSavedBy,
    /// User that last saved the database
    LastSavedByUser,
    /// Host the database was last saved on
    LastSavedOnHost,
    /// Short name for the database
    DatabaseName,
    /// Longer description of the database
    DatabaseDescription,
    /// Last field of the header
    End,
    /// Header field unknown to this library
    Unknown(u8),
}

impl From<u8> for HeaderFieldType {
    fn from(id: u8) -> HeaderFieldType {
        match id {
            0x00 => HeaderFieldType::Version,
            0x01 => HeaderFieldType::Uuid,
            0x02 => HeaderFieldType::NonDefaultPreferences,
            0x03 => HeaderFieldType::TreeDisplayStatus,
            0x04 => HeaderFieldType::LastSaveTime,
            0x06 => HeaderFieldType::LastSavedBy,
            0x07 => HeaderFieldType::LastSavedByUser,
            0x08 => HeaderFieldType::LastSavedOnHost,
            0x09 => HeaderFieldType::DatabaseName,
            0x0a => HeaderFieldType::DatabaseDescription,
            END_OF_ITEM => HeaderFieldType::End,
            x => HeaderFieldType::Unknown(x),
        }
    }
}

impl From<HeaderFieldType> for u8 {
    fn from(ty: HeaderFieldType) -> u8 {
        match ty {
            HeaderFieldType::Version => 0x00,
            HeaderFieldType::Uuid => 0x01,
            HeaderFieldType::NonDefaultPreferences => 0x02,
            HeaderFieldType::TreeDisplayStatus => 0x03,
            HeaderFieldType::LastSaveTime => 0x04,
            HeaderFieldType::LastSavedBy => 0x06,
            HeaderFieldType::LastSavedByUser => 0x07,
            HeaderFieldType::LastSavedOnHost => 0x08,
            HeaderFieldType::DatabaseName => 0x09,
            HeaderFieldType::DatabaseDescription => 0x0a,
            HeaderFieldType::End => END_OF_ITEM,
            HeaderFieldType::Unknown(x) => x,
        }
    }
}

impl FieldId for HeaderFieldType {
    fn is_end(&self) -> bool {
        *self == HeaderFieldType::End
    }
}
