//! STL (Stereolithography) file format support.
//!
//! Both encodings decode into a [`TriangleSoup`]: one [`Facet`] per triangle,
//! normals kept exactly as stored, no vertex sharing.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (ignored)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (ignored)
//! end
//! ```
//!
//! # ASCII Format
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use mesh_types::{Facet, Point3, TriangleSoup, Vector3};
use tracing::{debug, info};

use crate::error::{IoError, IoResult};
use crate::sniff::{StlFormat, classify};

/// STL binary header size in bytes.
pub(crate) const HEADER_SIZE: usize = 80;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
pub(crate) const TRIANGLE_SIZE: usize = 50;

/// Upper bound on facets reserved up front from a declared count.
const PREALLOCATE_LIMIT: usize = 1 << 20;

/// Load an STL file, sniffing its encoding first.
///
/// # Errors
///
/// Returns an error if the file is missing or unreadable, if its content is
/// not valid STL in the sniffed encoding, if a binary body is shorter than
/// its declared triangle count, or if it holds no triangles. No partial mesh
/// is ever returned.
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_stl;
///
/// let soup = load_stl("femur.stl").unwrap();
/// println!("Loaded {} facets", soup.face_count());
/// ```
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<TriangleSoup> {
    let path = path.as_ref();
    let format = classify(path);
    load_stl_as(path, format)
}

/// Load an STL file in a known encoding, bypassing the sniffer.
///
/// # Errors
///
/// Same conditions as [`load_stl`].
pub fn load_stl_as<P: AsRef<Path>>(path: P, format: StlFormat) -> IoResult<TriangleSoup> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;

    let soup = read_stl(BufReader::new(file), format)?;
    info!(
        "Loaded {} STL {} ({} facets)",
        format,
        path.display(),
        soup.face_count()
    );
    Ok(soup)
}

/// Decode STL from a reader in the given encoding.
///
/// # Errors
///
/// Returns an error on malformed content, a truncated binary body, or a
/// file without triangles.
pub fn read_stl<R: BufRead>(reader: R, format: StlFormat) -> IoResult<TriangleSoup> {
    let soup = match format {
        StlFormat::Binary => read_binary(reader)?,
        StlFormat::Ascii => read_ascii(reader)?,
    };
    if soup.is_empty() {
        return Err(IoError::EmptyMesh);
    }
    Ok(soup)
}

fn read_binary<R: Read>(mut reader: R) -> IoResult<TriangleSoup> {
    let mut header = [0u8; HEADER_SIZE + 4];
    let got = read_fully(&mut reader, &mut header)?;
    if got < header.len() {
        return Err(IoError::InvalidHeader {
            expected: HEADER_SIZE + 4,
            got,
        });
    }

    let face_count = u32::from_le_bytes([
        header[HEADER_SIZE],
        header[HEADER_SIZE + 1],
        header[HEADER_SIZE + 2],
        header[HEADER_SIZE + 3],
    ]);
    debug!("binary STL declares {face_count} triangles");

    // A corrupt count must not drive the allocation.
    let mut soup = TriangleSoup::with_capacity((face_count as usize).min(PREALLOCATE_LIMIT));
    let mut buf = [0u8; TRIANGLE_SIZE];
    for i in 0..face_count {
        if read_fully(&mut reader, &mut buf)? < TRIANGLE_SIZE {
            return Err(IoError::TruncatedBody {
                expected: face_count,
                got: i,
            });
        }
        soup.push(Facet::new(
            read_vector(&buf[0..12]),
            [
                Point3::from(read_vector(&buf[12..24])),
                Point3::from(read_vector(&buf[24..36])),
                Point3::from(read_vector(&buf[36..48])),
            ],
        ));
    }

    Ok(soup)
}

/// Fill `buf` as far as the stream allows; returns the bytes read.
fn read_fully<R: Read>(reader: &mut R, buf: &mut [u8]) -> IoResult<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

/// Read three little-endian f32s.
fn read_vector(buf: &[u8]) -> Vector3<f64> {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Vector3::new(f64::from(x), f64::from(y), f64::from(z))
}

fn read_ascii<R: BufRead>(reader: R) -> IoResult<TriangleSoup> {
    let mut soup = TriangleSoup::new();
    let mut normal: Option<Vector3<f64>> = None;
    let mut in_loop = false;
    let mut corners: Vec<Point3<f64>> = Vec::with_capacity(3);

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| {
            if e.kind() == ErrorKind::InvalidData {
                IoError::invalid_content(format!("line {}: not valid UTF-8 text", line_no + 1))
            } else {
                IoError::Io(e)
            }
        })?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(keyword) = parts.first() else {
            continue;
        };

        match keyword.to_ascii_lowercase().as_str() {
            "facet" => {
                if parts.len() < 5 || !parts[1].eq_ignore_ascii_case("normal") {
                    return Err(IoError::invalid_content(format!(
                        "line {}: expected 'facet normal ni nj nk'",
                        line_no + 1
                    )));
                }
                normal = Some(parse_triple(&parts[2..5])?);
            }
            "outer" => {
                in_loop = true;
                corners.clear();
            }
            "vertex" => {
                if !in_loop || parts.len() < 4 {
                    return Err(IoError::invalid_content(format!(
                        "line {}: vertex outside 'outer loop' or with missing coordinates",
                        line_no + 1
                    )));
                }
                corners.push(Point3::from(parse_triple(&parts[1..4])?));
            }
            "endloop" => in_loop = false,
            "endfacet" => {
                let (Some(n), [a, b, c]) = (normal.take(), corners.as_slice()) else {
                    return Err(IoError::invalid_content(format!(
                        "line {}: facet needs a normal and exactly 3 vertices, found {}",
                        line_no + 1,
                        corners.len()
                    )));
                };
                soup.push(Facet::new(n, [*a, *b, *c]));
                corners.clear();
            }
            "endsolid" => break,
            _ => {}
        }
    }

    if normal.is_some() || in_loop || !corners.is_empty() {
        return Err(IoError::invalid_content("unexpected end of file inside facet"));
    }

    Ok(soup)
}

fn parse_triple(parts: &[&str]) -> IoResult<Vector3<f64>> {
    Ok(Vector3::new(
        parts[0].parse()?,
        parts[1].parse()?,
        parts[2].parse()?,
    ))
}

/// Save a soup to an STL file.
///
/// Stored normals are written as they are.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
///
/// # Example
///
/// ```no_run
/// use mesh_io::{load_stl, save_stl, StlFormat};
///
/// let soup = load_stl("input.stl").unwrap();
/// save_stl(&soup, "output.stl", StlFormat::Binary).unwrap();
/// ```
pub fn save_stl<P: AsRef<Path>>(soup: &TriangleSoup, path: P, format: StlFormat) -> IoResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_stl(soup, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode a soup as STL into any writer.
///
/// # Errors
///
/// Returns an error if writing fails or the soup has more than `u32::MAX`
/// facets (binary only).
pub fn write_stl<W: Write>(soup: &TriangleSoup, writer: W, format: StlFormat) -> IoResult<()> {
    match format {
        StlFormat::Binary => write_binary(soup, writer),
        StlFormat::Ascii => write_ascii(soup, writer),
    }
}

fn write_binary<W: Write>(soup: &TriangleSoup, mut writer: W) -> IoResult<()> {
    let mut header = [b' '; HEADER_SIZE];
    let text = b"Binary STL generated by bone-mesh mesh-io";
    header[..text.len()].copy_from_slice(text);
    writer.write_all(&header)?;

    let face_count = u32::try_from(soup.face_count())
        .map_err(|_| IoError::invalid_content("too many facets for binary STL"))?;
    writer.write_all(&face_count.to_le_bytes())?;

    for facet in soup {
        write_vector(&mut writer, &facet.normal)?;
        for v in &facet.vertices {
            write_vector(&mut writer, &v.coords)?;
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }

    Ok(())
}

fn write_vector<W: Write>(writer: &mut W, v: &Vector3<f64>) -> IoResult<()> {
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: binary STL stores f32
    for c in [v.x as f32, v.y as f32, v.z as f32] {
        writer.write_all(&c.to_le_bytes())?;
    }
    Ok(())
}

fn write_ascii<W: Write>(soup: &TriangleSoup, mut writer: W) -> IoResult<()> {
    writeln!(writer, "solid mesh")?;
    for facet in soup {
        let n = facet.normal;
        writeln!(writer, "  facet normal {:e} {:e} {:e}", n.x, n.y, n.z)?;
        writeln!(writer, "    outer loop")?;
        for v in &facet.vertices {
            writeln!(writer, "      vertex {:e} {:e} {:e}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }
    writeln!(writer, "endsolid mesh")?;
    Ok(())
}
