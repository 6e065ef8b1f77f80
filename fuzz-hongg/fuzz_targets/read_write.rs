use bytes::{Buf, Bytes};
use honggfuzz::fuzz;
use nbt_stream::{BEDROCK, BEDROCK_NETWORK, Format, JAVA, NbtDocument, NbtReader, read_document};

fn round_trip<F: Format>(format: F, data: &[u8]) {
    let Ok(doc) = NbtDocument::from_slice(format, data) else {
        return;
    };
    let bytes = doc.to_vec(format).unwrap();
    assert_eq!(NbtDocument::from_slice(format, &bytes).unwrap(), doc);

    let _ = doc.to_vec(JAVA);
    let _ = doc.to_vec(BEDROCK);
    let _ = doc.to_vec(BEDROCK_NETWORK);
}

fn skip<F: Format>(format: F, data: &[u8]) {
    let mut reader = NbtReader::new(format, data);
    let skipped = reader.skip_value().is_ok();
    let parsed = NbtDocument::from_slice(format, data).is_ok();
    // skipping never rejects what a full read accepts
    assert!(skipped || !parsed);
}

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            round_trip(JAVA, data);
            round_trip(BEDROCK, data);
            round_trip(BEDROCK_NETWORK, data);

            skip(JAVA, data);
            skip(BEDROCK_NETWORK, data);

            let shared = Bytes::copy_from_slice(data);
            let _ = read_document(BEDROCK, shared.reader());
        });
    }
}
