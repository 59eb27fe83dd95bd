//! vCard test fixtures.
//!
//! Samples of what phones and desktop address books actually export.

/// Plain vCard 3.0
pub const VCARD_BASIC: &str = "\
BEGIN:VCARD\r\n\
VERSION:3.0\r\n\
FN:John Doe\r\n\
N:Doe;John;;;\r\n\
EMAIL:john.doe@example.com\r\n\
TEL;TYPE=CELL:+1-555-555-5555\r\n\
END:VCARD\r\n";

/// vCard 2.1 phone export with a quoted-printable UTF-8 name
pub const VCARD_21_QP: &str = "\
BEGIN:VCARD\r\n\
VERSION:2.1\r\n\
N;CHARSET=UTF-8;ENCODING=QUOTED-PRINTABLE:Nguy=E1=BB=85n;Qu=C3=A2n;;;\r\n\
FN;CHARSET=UTF-8;ENCODING=QUOTED-PRINTABLE:Qu=C3=A2n Nguy=E1=BB=85n\r\n\
TEL;CELL:0912345678\r\n\
TEL;HOME:0243999999\r\n\
END:VCARD\r\n";

/// Quoted-printable name in a legacy single-byte charset
pub const VCARD_21_LATIN1: &str = "\
BEGIN:VCARD\r\n\
VERSION:2.1\r\n\
N;CHARSET=ISO-8859-1;ENCODING=QUOTED-PRINTABLE:M=FCller;J=FCrgen\r\n\
TEL:030123456\r\n\
END:VCARD\r\n";

/// Folded lines, grouped properties and an unknown extension
pub const VCARD_FOLDED: &str = "\
BEGIN:VCARD\r\n\
VERSION:3.0\r\n\
FN:Robert Wilson\r\n\
N:Wilson;Robert;;;\r\n\
NOTE:This note is long enough that the exporting application decided to \r\n \
fold it across two physical lines.\r\n\
item1.ADR;TYPE=work:;;123 Main St;Anytown;CA;12345;USA\r\n\
item1.X-ABLabel:Office\r\n\
X-CUSTOM-THING:kept verbatim\r\n\
TEL;TYPE=WORK,VOICE:+1-555-0100\r\n\
END:VCARD\r\n";

/// Three stacked cards; the second one has a malformed name
pub const VCARD_STACK_WITH_BAD_BLOCK: &str = "\
BEGIN:VCARD\r\n\
VERSION:3.0\r\n\
FN:Alice\r\n\
N:A;Alice;;;\r\n\
TEL:111\r\n\
END:VCARD\r\n\
BEGIN:VCARD\r\n\
VERSION:2.1\r\n\
N;CHARSET=X-NOT-A-CHARSET;ENCODING=QUOTED-PRINTABLE:B=E1;Bob\r\n\
TEL:222\r\n\
END:VCARD\r\n\
BEGIN:VCARD\r\n\
VERSION:3.0\r\n\
FN:Carol\r\n\
N:C;Carol;;;\r\n\
TEL:333\r\n\
END:VCARD\r\n";

/// Invalid VERSION value
pub const VCARD_BAD_VERSION: &str = "\
BEGIN:VCARD\r\n\
VERSION:3.0beta\r\n\
FN:Dave\r\n\
END:VCARD\r\n";

/// A BEGIN with no matching END
pub const VCARD_UNBALANCED: &str = "\
BEGIN:VCARD\r\n\
VERSION:3.0\r\n\
FN:Eve\r\n\
END:VCARD\r\n\
BEGIN:VCARD\r\n\
FN:Frank\r\n";

/// Text before the first card
pub const VCARD_LEADING_GARBAGE: &str = "\
Contacts export\r\n\
BEGIN:VCARD\r\n\
VERSION:3.0\r\n\
FN:Grace\r\n\
END:VCARD\r\n";
