use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use nbt_stream::{
    BEDROCK, BEDROCK_NETWORK, Format, JAVA, NbtDocument, NbtReader, OwnCompound, OwnList, TagID,
};

fn chunk() -> NbtDocument {
    let mut sections = OwnList::new();
    for y in -4..20i8 {
        let mut palette = OwnList::new();
        for name in ["minecraft:air", "minecraft:stone", "minecraft:dirt", "minecraft:water"] {
            palette
                .push(OwnCompound::new().with("Name", name))
                .unwrap();
        }
        sections
            .push(
                OwnCompound::new()
                    .with("Y", y)
                    .with("palette", palette)
                    .with("data", vec![i64::from(y) * 0x0101_0101; 256])
                    .with("light", vec![0x0Fu8; 2048]),
            )
            .unwrap();
    }
    let mut entities = OwnList::new();
    for i in 0..64 {
        let mut pos = OwnList::new();
        for axis in [1.5f64, 64.0, -3.25] {
            pos.push(axis * f64::from(i)).unwrap();
        }
        entities
            .push(
                OwnCompound::new()
                    .with("id", "minecraft:zombie")
                    .with("Pos", pos)
                    .with("Health", 20.0f32)
                    .with("UUID", vec![i, i + 1, i + 2, i + 3]),
            )
            .unwrap();
    }
    NbtDocument::compound(
        "",
        OwnCompound::new()
            .with("DataVersion", 3465i32)
            .with("sections", sections)
            .with("entities", entities),
    )
}

fn walk<F: Format>(format: F, bytes: &[u8]) -> usize {
    let mut reader = NbtReader::new(format, bytes);
    let mut count = 0;
    reader.next_type().unwrap();
    reader.next_name().unwrap();
    reader.begin_compound().unwrap();
    while reader.next_type().unwrap() != TagID::End {
        reader.next_name().unwrap();
        reader.skip_value().unwrap();
        count += 1;
    }
    reader.end_compound().unwrap();
    count
}

fn bench_format<F: Format>(c: &mut Criterion, name: &str, format: F) {
    let doc = chunk();
    let bytes = doc.to_vec(format).unwrap();

    let mut group = c.benchmark_group(name);
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function(BenchmarkId::new("read", bytes.len()), |b| {
        b.iter(|| NbtDocument::from_slice(format, black_box(&bytes)).unwrap())
    });
    group.bench_function(BenchmarkId::new("write", bytes.len()), |b| {
        b.iter(|| black_box(&doc).to_vec(format).unwrap())
    });
    group.bench_function(BenchmarkId::new("skip", bytes.len()), |b| {
        b.iter(|| walk(format, black_box(&bytes)))
    });
    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    bench_format(c, "java", JAVA);
    bench_format(c, "bedrock", BEDROCK);
    bench_format(c, "bedrock_network", BEDROCK_NETWORK);
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
