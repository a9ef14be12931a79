//! Shared vCard test fixtures.

pub const VCARD_BASIC: &str = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:Jane Example\r\n\
N:Example;Jane;;;\r\n\
EMAIL;TYPE=work:jane@example.com\r\n\
TEL;TYPE=cell:+1-555-555-5555\r\n\
UID:urn:uuid:4fbe8971-0bc3-424c-9c26-36c3e1eff6b1\r\n\
END:VCARD\r\n";

pub const VCARD_STRUCTURED: &str = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:Dr. Jon Quinlan Doe Jr.\r\n\
N:Doe;Jon;Quinlan;Dr.;Jr.\r\n\
ORG:ABC\\, Inc.;North American Division;Marketing\r\n\
ADR;TYPE=work:;;123 Main St;Anytown;CA;91921;USA\r\n\
CATEGORIES:friends,co-workers\r\n\
END:VCARD\r\n";

pub const VCARD_GROUPED: &str = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:Grouped Props\r\n\
item1.TEL:+1-555-555-5555\r\n\
item1.X-ABLABEL:main line\r\n\
item2.URL:https://example.com:8080/path\r\n\
END:VCARD\r\n";

pub const VCARD_DATES: &str = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:Birthday Person\r\n\
BDAY:--0415\r\n\
ANNIVERSARY:20090808T1430-0500\r\n\
REV:19951031T222710Z\r\n\
END:VCARD\r\n";

pub const VCARD_V3: &str = "\
BEGIN:VCARD\r\n\
VERSION:3.0\r\n\
FN:Version Three\r\n\
N:Three;Version;;;\r\n\
EMAIL;TYPE=INTERNET:v3@example.com\r\n\
NOTE:Escaped\\, comma and \\; semicolon\r\n\
END:VCARD\r\n";

pub const VCARD_V21: &str = "\
BEGIN:VCARD\r\n\
VERSION:2.1\r\n\
N:Doe;Jon;;;\r\n\
FN:Jon Doe\r\n\
EMAIL;X-INTERN:foo@example.org\r\n\
PHOTO;BASE64:cmFuZG9tX3N0dWZm\r\n\
UID:foo\r\n\
END:VCARD\r\n";

pub const VCARD_UNICODE: &str = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:田中太郎\r\n\
N:田中;太郎;;;\r\n\
NOTE:日本語のメモ\r\n\
END:VCARD\r\n";
