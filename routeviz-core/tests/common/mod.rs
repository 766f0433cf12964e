use routeviz_core::Node;

/// Square grid of `size` x `size` nodes numbered row by row from 1
pub fn grid_nodes(size: i64, lat0: f64, lon0: f64, spacing: f64) -> Vec<Node> {
    (0..size * size)
        .map(|index| {
            let (row, col) = (index / size, index % size);
            Node::new(
                index + 1,
                lat0 + row as f64 * spacing,
                lon0 + col as f64 * spacing,
            )
        })
        .collect()
}
