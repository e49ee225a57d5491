//! Squarified treemap tiling (d3-compatible port).
//!
//! The hierarchy is flattened into a `Vec<HierNode>` arena; `squarify` partitions each region
//! among a node's children proportionally to their subtree sums, choosing the split
//! orientation that keeps aspect ratios near the golden ratio. Children keep document order
//! (no value sort), so identical input always produces identical rectangles.

use marquee_core::Dataset;

/// One laid-out leaf, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct TileRect {
    pub name: String,
    pub category: String,
    pub value: f64,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

#[derive(Debug, Clone)]
struct HierNode {
    name: String,
    category: String,
    own_value: f64,
    value: f64,
    parent: Option<usize>,
    children: Vec<usize>,
    depth: usize,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

fn push_node(
    nodes: &mut Vec<HierNode>,
    name: &str,
    category: &str,
    own_value: f64,
    parent: Option<usize>,
    depth: usize,
) -> usize {
    let idx = nodes.len();
    nodes.push(HierNode {
        name: name.to_string(),
        category: category.to_string(),
        own_value,
        value: 0.0,
        parent,
        children: Vec::new(),
        depth,
        x0: 0.0,
        y0: 0.0,
        x1: 0.0,
        y1: 0.0,
    });
    if let Some(parent_idx) = parent {
        nodes[parent_idx].children.push(idx);
    }
    idx
}

fn build_arena(dataset: &Dataset) -> Vec<HierNode> {
    let mut nodes: Vec<HierNode> = Vec::new();
    let root = push_node(&mut nodes, &dataset.name, "", 0.0, None, 0);
    for category in &dataset.children {
        let cat_idx = push_node(&mut nodes, &category.name, &category.name, 0.0, Some(root), 1);
        for leaf in &category.children {
            push_node(
                &mut nodes,
                &leaf.name,
                &leaf.category,
                leaf.value,
                Some(cat_idx),
                2,
            );
        }
    }
    nodes
}

fn compute_sum(nodes: &mut [HierNode], idx: usize) -> f64 {
    let mut sum = nodes[idx].own_value;
    let children = nodes[idx].children.clone();
    for c in children {
        sum += compute_sum(nodes, c);
    }
    nodes[idx].value = sum;
    sum
}

fn each_before(nodes: &[HierNode], root: usize) -> Vec<usize> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(idx) = stack.pop() {
        out.push(idx);
        let children = &nodes[idx].children;
        for &c in children.iter().rev() {
            stack.push(c);
        }
    }
    out
}

fn treemap_dice(
    nodes: &mut [HierNode],
    children: &[usize],
    row_value: f64,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
) {
    let mut x = x0;
    let k = if row_value != 0.0 {
        (x1 - x0) / row_value
    } else {
        0.0
    };
    for &child in children {
        nodes[child].y0 = y0;
        nodes[child].y1 = y1;
        nodes[child].x0 = x;
        x += nodes[child].value * k;
        nodes[child].x1 = x;
    }
}

fn treemap_slice(
    nodes: &mut [HierNode],
    children: &[usize],
    row_value: f64,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
) {
    let mut y = y0;
    let k = if row_value != 0.0 {
        (y1 - y0) / row_value
    } else {
        0.0
    };
    for &child in children {
        nodes[child].x0 = x0;
        nodes[child].x1 = x1;
        nodes[child].y0 = y;
        y += nodes[child].value * k;
        nodes[child].y1 = y;
    }
}

fn squarify(nodes: &mut [HierNode], parent: usize, mut x0: f64, mut y0: f64, x1: f64, y1: f64) {
    const PHI: f64 = (1.0 + 2.23606797749979) / 2.0;
    let ratio = PHI;

    let children = nodes[parent].children.clone();
    if children.is_empty() {
        return;
    }

    let n = children.len();
    let mut i0 = 0usize;
    let mut i1 = 0usize;
    let mut value = nodes[parent].value;

    while i0 < n {
        let dx = x1 - x0;
        let dy = y1 - y0;

        // Find the next non-empty child to start the row.
        let mut sum_value;
        loop {
            if i1 >= n {
                return;
            }
            sum_value = nodes[children[i1]].value;
            i1 += 1;
            if sum_value != 0.0 || i1 >= n {
                break;
            }
        }

        let mut min_value = sum_value;
        let mut max_value = sum_value;

        let alpha = (dy / dx).max(dx / dy) / (value * ratio);
        let mut beta = sum_value * sum_value * alpha;
        let mut min_ratio = (max_value / beta).max(beta / min_value);

        // Grow the row while the worst aspect ratio keeps improving.
        while i1 < n {
            let node_value = nodes[children[i1]].value;
            sum_value += node_value;
            if node_value < min_value {
                min_value = node_value;
            }
            if node_value > max_value {
                max_value = node_value;
            }
            beta = sum_value * sum_value * alpha;
            let new_ratio = (max_value / beta).max(beta / min_value);
            if new_ratio > min_ratio {
                sum_value -= node_value;
                break;
            }
            min_ratio = new_ratio;
            i1 += 1;
        }

        let dice = dx < dy;
        let row_children = &children[i0..i1];
        if dice {
            let y2 = if value != 0.0 {
                y0 + dy * sum_value / value
            } else {
                y1
            };
            treemap_dice(nodes, row_children, sum_value, x0, y0, x1, y2);
            y0 = y2;
        } else {
            let x2 = if value != 0.0 {
                x0 + dx * sum_value / value
            } else {
                x1
            };
            treemap_slice(nodes, row_children, sum_value, x0, y0, x2, y1);
            x0 = x2;
        }

        value -= sum_value;
        i0 = i1;
    }
}

/// Applies the per-depth padding insets and recurses via `squarify`, exactly as d3's
/// `treemap().padding(p)` does: `p` acts as both outer and inner padding at every level.
fn position_node(nodes: &mut [HierNode], idx: usize, padding_stack: &mut Vec<f64>, padding: f64) {
    let depth = nodes[idx].depth;
    if padding_stack.len() <= depth {
        padding_stack.resize(depth + 1, 0.0);
    }
    let mut p = padding_stack[depth];
    let mut x0 = nodes[idx].x0 + p;
    let mut y0 = nodes[idx].y0 + p;
    let mut x1 = nodes[idx].x1 - p;
    let mut y1 = nodes[idx].y1 - p;
    if x1 < x0 {
        x0 = (x0 + x1) / 2.0;
        x1 = x0;
    }
    if y1 < y0 {
        y0 = (y0 + y1) / 2.0;
        y1 = y0;
    }
    nodes[idx].x0 = x0;
    nodes[idx].y0 = y0;
    nodes[idx].x1 = x1;
    nodes[idx].y1 = y1;

    if nodes[idx].children.is_empty() {
        return;
    }

    p = padding / 2.0;
    if padding_stack.len() <= depth + 1 {
        padding_stack.resize(depth + 2, 0.0);
    }
    padding_stack[depth + 1] = p;

    x0 += padding - p;
    y0 += padding - p;
    x1 -= padding - p;
    y1 -= padding - p;
    if x1 < x0 {
        x0 = (x0 + x1) / 2.0;
        x1 = x0;
    }
    if y1 < y0 {
        y0 = (y0 + y1) / 2.0;
        y1 = y0;
    }

    squarify(nodes, idx, x0, y0, x1, y1);
}

/// Lays out every leaf of `dataset` inside a `width` x `height` region with `padding` px
/// between adjacent tiles. Leaves with value 0 collapse to zero-area tiles.
pub fn layout_tiles(dataset: &Dataset, width: f64, height: f64, padding: f64) -> Vec<TileRect> {
    let mut nodes = build_arena(dataset);
    let root = 0usize;
    compute_sum(&mut nodes, root);

    nodes[root].x0 = 0.0;
    nodes[root].y0 = 0.0;
    nodes[root].x1 = width;
    nodes[root].y1 = height;

    let mut padding_stack = vec![0.0];
    for idx in each_before(&nodes, root) {
        position_node(&mut nodes, idx, &mut padding_stack, padding.max(0.0));
    }

    let mut tiles = Vec::new();
    for idx in each_before(&nodes, root) {
        let n = &nodes[idx];
        if !n.children.is_empty() || n.parent.is_none() {
            continue;
        }
        tiles.push(TileRect {
            name: n.name.clone(),
            category: n.category.clone(),
            value: n.value,
            x0: n.x0,
            y0: n.y0,
            x1: n.x1,
            y1: n.y1,
        });
    }
    tiles
}
