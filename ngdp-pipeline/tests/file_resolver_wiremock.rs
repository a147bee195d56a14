//! Exercises `FileResolver::get_file` end to end (root lookup, encoding
//! lookup, archive-index lookup, ranged CDN fetch, cache write-through and
//! warm-hit) against a `wiremock` mock CDN instead of real Blizzard hosts.

use ngdp_cache::build::BuildCache;
use ngdp_cdn::CdnClient;
use ngdp_pipeline::{ArchiveEntry, FileResolver, GlobalArchiveIndex, LoadedBuild, PreloadedBuild};
use tact_client::{ProductDescriptor, ServerDescriptor};
use tact_parser::config::{BuildConfig, CdnConfig};
use tact_parser::encoding::EncodingFile;
use tact_parser::wow_root::{LocaleFlags, WowRoot};
use tact_parser::{ArchiveKey, EncodingKey};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CK_BYTES: [u8; 16] = [0xAA; 16];
const EK_BYTES: [u8; 16] = [0xBB; 16];
const AK_BYTES: [u8; 16] = [0xCC; 16];
const FILE_DATA_ID: u32 = 42;
const PAYLOAD: &[u8] = b"archive-member-bytes";

fn minimal_encoding_file() -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(b"EN");
    data.push(1); // version
    data.push(16); // ckey_hash_size
    data.push(16); // ekey_hash_size
    data.extend_from_slice(&1u16.to_be_bytes()); // ckey_page_size_kb
    data.extend_from_slice(&0u16.to_be_bytes()); // ekey_page_size_kb
    data.extend_from_slice(&1u32.to_be_bytes()); // ckey_page_count
    data.extend_from_slice(&0u32.to_be_bytes()); // ekey_page_count
    data.push(0); // unk
    data.extend_from_slice(&0u32.to_be_bytes()); // espec_block_size

    // One CKey page table entry: first_hash[16] + checksum[16] (checksum
    // mismatches are only logged, so zeros are fine here).
    data.extend_from_slice(&[0u8; 32]);

    let mut page = vec![0u8; 1024];
    let mut p = 0;
    page[p] = 1; // key_count
    p += 1;
    let size_bytes = tact_parser::utils::write_uint40_be(PAYLOAD.len() as u64);
    page[p..p + 5].copy_from_slice(&size_bytes);
    p += 5;
    page[p..p + 16].copy_from_slice(&CK_BYTES);
    p += 16;
    page[p..p + 16].copy_from_slice(&EK_BYTES);
    data.extend_from_slice(&page);

    data
}

fn minimal_root_file() -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(b"TSFM");
    data.extend_from_slice(&0u32.to_le_bytes()); // header_size == 0
    data.extend_from_slice(&1u32.to_le_bytes()); // named_file_count

    // One block, all locales, content flags 0, one record at FILE_DATA_ID.
    let all_locales = 0xffff_ffffu32;
    data.extend_from_slice(&1u32.to_le_bytes()); // num_records
    data.extend_from_slice(&0u32.to_le_bytes()); // content flags
    data.extend_from_slice(&all_locales.to_le_bytes());
    data.extend_from_slice(&(FILE_DATA_ID as i32).to_le_bytes()); // delta == fid for first record
    data.extend_from_slice(&CK_BYTES);
    data.extend_from_slice(&0u64.to_le_bytes()); // name hash

    data
}

fn loaded_build(edge_host: String) -> LoadedBuild {
    let encoding = EncodingFile::parse(&minimal_encoding_file()).unwrap();
    let mut root_cursor = std::io::Cursor::new(minimal_root_file());
    let root = WowRoot::parse(&mut root_cursor, LocaleFlags::any_locale()).unwrap();

    let mut archives = GlobalArchiveIndex::default();
    archives.insert(
        EncodingKey::from(EK_BYTES),
        ArchiveEntry {
            archive_key: ArchiveKey::from(AK_BYTES),
            offset: 0,
            size: PAYLOAD.len() as u32,
        },
    );

    let preloaded = PreloadedBuild {
        product: ProductDescriptor {
            product: "wow".into(),
            region: "us".into(),
            build_config: "deadbeef".into(),
            cdn_config: "feedface".into(),
            key_ring: None,
            build_id: 1,
            versions_name: "1.0.0.1".into(),
            product_config: "0123abcd".into(),
        },
        server: ServerDescriptor {
            name: "us".into(),
            path: "tpr/wow".into(),
            hosts: vec![edge_host.clone()],
            servers: vec![],
            config_path: "tpr/configs/data".into(),
        },
        edge_host,
        build_config: BuildConfig::default(),
        cdn_config: CdnConfig::default(),
        archives,
    };

    LoadedBuild {
        preloaded,
        encoding,
        root,
    }
}

#[tokio::test]
async fn fetches_from_archive_range_then_serves_subsequent_calls_from_cache() {
    let server = MockServer::start().await;
    let ak_hex = ArchiveKey::from(AK_BYTES).to_hex();
    let data_path = format!(
        "/tpr/wow/data/{}/{}/{}",
        &ak_hex[0..2],
        &ak_hex[2..4],
        ak_hex
    );

    Mock::given(method("GET"))
        .and(path(data_path))
        .respond_with(ResponseTemplate::new(206).set_body_bytes(PAYLOAD))
        .expect(1)
        .mount(&server)
        .await;

    let cdn_host = server.address().to_string();
    let build = loaded_build(cdn_host);

    let cache_dir = tempfile::tempdir().unwrap();
    let cache = BuildCache::new(cache_dir.path(), "deadbeef").await.unwrap();
    cache.init().await.unwrap();

    let cdn = CdnClient::new().unwrap();
    let resolver = FileResolver::new(&build, &cache, &cdn);

    let blob = resolver.get_file(FILE_DATA_ID).await.unwrap();
    assert_eq!(blob.ekey, EncodingKey::from(EK_BYTES));
    assert_eq!(blob.bytes, PAYLOAD);

    // Second call must hit the cache: the mock only expects exactly one hit.
    let cached = resolver.get_file(FILE_DATA_ID).await.unwrap();
    assert_eq!(cached.bytes, PAYLOAD);
}

#[tokio::test]
async fn unknown_file_data_id_is_not_found() {
    let build = loaded_build("127.0.0.1:1".to_string());
    let cache_dir = tempfile::tempdir().unwrap();
    let cache = BuildCache::new(cache_dir.path(), "deadbeef").await.unwrap();
    cache.init().await.unwrap();
    let cdn = CdnClient::new().unwrap();
    let resolver = FileResolver::new(&build, &cache, &cdn);

    let err = resolver.get_file(9999).await.unwrap_err();
    assert!(matches!(err, ngdp_pipeline::Error::NotFound(9999)));
}
