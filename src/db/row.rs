use super::metadata::{Entity, SqliteRow, SqlxError};

/// Split one flat joined row into its primary and secondary entities and
/// let the caller wire the navigation field. The primary occupies the
/// first `projected_len` columns, the secondary the block after it, so the
/// row must come from a metadata-ordered projection (`query::join_select`).
///
/// The secondary side is decoded unconditionally: the joins in this
/// system are inner joins over mandatory relations.
pub fn map_joined<P, S, F>(row: &SqliteRow, map: F) -> Result<P, SqlxError>
where
    P: Entity,
    S: Entity,
    F: FnOnce(P, S) -> P,
{
    let primary = P::from_row_at(row, 0)?;
    let secondary = S::from_row_at(row, P::meta().projected_len())?;
    Ok(map(primary, secondary))
}

/// `map_joined` over a whole result set.
pub fn map_joined_rows<P, S, F>(rows: &[SqliteRow], mut map: F) -> Result<Vec<P>, SqlxError>
where
    P: Entity,
    S: Entity,
    F: FnMut(P, S) -> P,
{
    let mut mapped = Vec::with_capacity(rows.len());
    for row in rows {
        mapped.push(map_joined::<P, S, _>(row, &mut map)?);
    }
    Ok(mapped)
}
