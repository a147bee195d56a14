//! Response types for TACT HTTP endpoints using ngdp-bpsv

use crate::{Error, Result};
use ngdp_bpsv::BpsvDocument;

/// Per-product version descriptor (from /versions endpoint)
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDescriptor {
    /// Product this descriptor was fetched for (e.g. "wow")
    pub product: String,
    /// Region code
    pub region: String,
    /// Build configuration hash
    pub build_config: String,
    /// CDN configuration hash
    pub cdn_config: String,
    /// Optional key ring hash
    pub key_ring: Option<String>,
    /// Build ID number
    pub build_id: u32,
    /// Human-readable version name
    pub versions_name: String,
    /// Product configuration hash
    pub product_config: String,
}

/// Per-region edge-server descriptor (from /cdns endpoint)
#[derive(Debug, Clone, PartialEq)]
pub struct ServerDescriptor {
    /// CDN name/identifier (e.g., "us", "eu")
    pub name: String,
    /// CDN path prefix (e.g., "tpr/wow")
    pub path: String,
    /// List of CDN hostnames (space-separated in manifest)
    pub hosts: Vec<String>,
    /// List of CDN server URLs (space-separated in manifest)
    pub servers: Vec<String>,
    /// Configuration path on the CDN
    pub config_path: String,
}

/// Background download configuration entry (from /bgdl endpoint)
#[derive(Debug, Clone, PartialEq)]
pub struct BgdlEntry {
    /// Region code
    pub region: String,
    /// Build configuration hash
    pub build_config: String,
    /// CDN configuration hash
    pub cdn_config: String,
    /// Optional install background download config
    pub install_bgdl_config: Option<String>,
    /// Optional game background download config
    pub game_bgdl_config: Option<String>,
}

/// Parse versions manifest into typed entries, tagging each with `product`
pub fn parse_versions(content: &str, product: &str) -> Result<Vec<ProductDescriptor>> {
    let doc = BpsvDocument::parse(content)?;
    let schema = doc.schema();

    // Pre-compute field indices for direct access
    let region_idx = schema
        .get_field("Region")
        .ok_or_else(|| Error::InvalidManifest {
            line: 0,
            reason: "Missing Region field".to_string(),
        })?
        .index;
    let build_config_idx = schema
        .get_field("BuildConfig")
        .ok_or_else(|| Error::InvalidManifest {
            line: 0,
            reason: "Missing BuildConfig field".to_string(),
        })?
        .index;
    let cdn_config_idx = schema
        .get_field("CDNConfig")
        .ok_or_else(|| Error::InvalidManifest {
            line: 0,
            reason: "Missing CDNConfig field".to_string(),
        })?
        .index;
    let key_ring_idx = schema.get_field("KeyRing").map(|f| f.index);
    let build_id_idx = schema
        .get_field("BuildId")
        .ok_or_else(|| Error::InvalidManifest {
            line: 0,
            reason: "Missing BuildId field".to_string(),
        })?
        .index;
    let versions_name_idx = schema
        .get_field("VersionsName")
        .ok_or_else(|| Error::InvalidManifest {
            line: 0,
            reason: "Missing VersionsName field".to_string(),
        })?
        .index;
    let product_config_idx = schema
        .get_field("ProductConfig")
        .ok_or_else(|| Error::InvalidManifest {
            line: 0,
            reason: "Missing ProductConfig field".to_string(),
        })?
        .index;

    let mut entries = Vec::with_capacity(doc.rows().len());

    for row in doc.rows() {
        entries.push(ProductDescriptor {
            product: product.to_string(),
            region: row
                .get_raw(region_idx)
                .ok_or_else(|| Error::missing_field("Region"))?
                .to_string(),
            build_config: row
                .get_raw(build_config_idx)
                .ok_or_else(|| Error::missing_field("BuildConfig"))?
                .to_string(),
            cdn_config: row
                .get_raw(cdn_config_idx)
                .ok_or_else(|| Error::missing_field("CDNConfig"))?
                .to_string(),
            key_ring: key_ring_idx.and_then(|idx| {
                row.get_raw(idx).and_then(|s| {
                    if s.is_empty() {
                        None
                    } else {
                        Some(s.to_string())
                    }
                })
            }),
            build_id: row
                .get_raw(build_id_idx)
                .ok_or_else(|| Error::missing_field("BuildId"))?
                .parse()
                .map_err(|_| {
                    let build_id_str = row.get_raw(build_id_idx).unwrap_or("<missing>"); // Safe because we checked above
                    Error::InvalidManifest {
                        line: 0,
                        reason: format!("Invalid BuildId: {build_id_str}"),
                    }
                })?,
            versions_name: row
                .get_raw(versions_name_idx)
                .ok_or_else(|| Error::missing_field("VersionsName"))?
                .to_string(),
            product_config: row
                .get_raw(product_config_idx)
                .ok_or_else(|| Error::missing_field("ProductConfig"))?
                .to_string(),
        });
    }

    Ok(entries)
}

/// Parse CDN manifest into typed entries
pub fn parse_cdns(content: &str) -> Result<Vec<ServerDescriptor>> {
    let doc = BpsvDocument::parse(content)?;
    let schema = doc.schema();

    // Pre-compute field indices for direct access
    let name_idx = schema
        .get_field("Name")
        .ok_or_else(|| Error::InvalidManifest {
            line: 0,
            reason: "Missing Name field".to_string(),
        })?
        .index;
    let path_idx = schema
        .get_field("Path")
        .ok_or_else(|| Error::InvalidManifest {
            line: 0,
            reason: "Missing Path field".to_string(),
        })?
        .index;
    let hosts_idx = schema
        .get_field("Hosts")
        .ok_or_else(|| Error::InvalidManifest {
            line: 0,
            reason: "Missing Hosts field".to_string(),
        })?
        .index;
    let servers_idx = schema.get_field("Servers").map(|f| f.index);
    let config_path_idx = schema
        .get_field("ConfigPath")
        .ok_or_else(|| Error::InvalidManifest {
            line: 0,
            reason: "Missing ConfigPath field".to_string(),
        })?
        .index;

    let mut entries = Vec::with_capacity(doc.rows().len());

    for row in doc.rows() {
        // Parse hosts as space-separated list
        let hosts_str = row
            .get_raw(hosts_idx)
            .ok_or_else(|| Error::missing_field("Hosts"))?;
        let hosts = if hosts_str.is_empty() {
            Vec::new()
        } else {
            hosts_str
                .split_whitespace()
                .map(|s| s.to_string())
                .collect()
        };

        // Parse servers as optional space-separated list
        let servers = servers_idx
            .and_then(|idx| row.get_raw(idx))
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.split_whitespace()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        entries.push(ServerDescriptor {
            name: row
                .get_raw(name_idx)
                .ok_or_else(|| Error::missing_field("Name"))?
                .to_string(),
            path: row
                .get_raw(path_idx)
                .ok_or_else(|| Error::missing_field("Path"))?
                .to_string(),
            hosts,
            servers,
            config_path: row
                .get_raw(config_path_idx)
                .ok_or_else(|| Error::missing_field("ConfigPath"))?
                .to_string(),
        });
    }

    Ok(entries)
}

/// Parse BGDL manifest into typed entries
pub fn parse_bgdl(content: &str) -> Result<Vec<BgdlEntry>> {
    let doc = BpsvDocument::parse(content)?;
    let schema = doc.schema();

    // Pre-compute field indices for direct access
    let region_idx = schema
        .get_field("Region")
        .ok_or_else(|| Error::InvalidManifest {
            line: 0,
            reason: "Missing Region field".to_string(),
        })?
        .index;
    let build_config_idx = schema
        .get_field("BuildConfig")
        .ok_or_else(|| Error::InvalidManifest {
            line: 0,
            reason: "Missing BuildConfig field".to_string(),
        })?
        .index;
    let cdn_config_idx = schema
        .get_field("CDNConfig")
        .ok_or_else(|| Error::InvalidManifest {
            line: 0,
            reason: "Missing CDNConfig field".to_string(),
        })?
        .index;
    let install_bgdl_idx = schema.get_field("InstallBGDLConfig").map(|f| f.index);
    let game_bgdl_idx = schema.get_field("GameBGDLConfig").map(|f| f.index);

    let mut entries = Vec::with_capacity(doc.rows().len());

    for row in doc.rows() {
        entries.push(BgdlEntry {
            region: row
                .get_raw(region_idx)
                .ok_or_else(|| Error::missing_field("Region"))?
                .to_string(),
            build_config: row
                .get_raw(build_config_idx)
                .ok_or_else(|| Error::missing_field("BuildConfig"))?
                .to_string(),
            cdn_config: row
                .get_raw(cdn_config_idx)
                .ok_or_else(|| Error::missing_field("CDNConfig"))?
                .to_string(),
            install_bgdl_config: install_bgdl_idx.and_then(|idx| {
                row.get_raw(idx).and_then(|s| {
                    if s.is_empty() {
                        None
                    } else {
                        Some(s.to_string())
                    }
                })
            }),
            game_bgdl_config: game_bgdl_idx.and_then(|idx| {
                row.get_raw(idx).and_then(|s| {
                    if s.is_empty() {
                        None
                    } else {
                        Some(s.to_string())
                    }
                })
            }),
        });
    }

    Ok(entries)
}
