use bytes::BufMut;

use crate::Data;

/// Serialize RESP data into a buffer.
pub fn to_bytes<B>(data: &Data<'_>, dst: &mut B)
where
	B: BufMut,
{
	match data {
		Data::SimpleString(str) => {
			dst.put_u8(b'+');
			dst.put_slice(str.as_bytes());
			dst.put_slice(b"\r\n");
		}
		Data::Integer(int) => {
			dst.put_u8(b':');
			dst.put_slice(int.to_string().as_bytes());
			dst.put_slice(b"\r\n");
		}
		Data::BulkString(bytes) => {
			dst.put_u8(b'$');
			dst.put_slice(bytes.len().to_string().as_bytes());
			dst.put_slice(b"\r\n");
			dst.put_slice(bytes);
			dst.put_slice(b"\r\n");
		}
		Data::Array(items) => {
			dst.put_u8(b'*');
			dst.put_slice(items.len().to_string().as_bytes());
			dst.put_slice(b"\r\n");
			for item in items {
				to_bytes(item, dst);
			}
		}
		Data::Null => dst.put_slice(b"$-1\r\n"),
	}
}
