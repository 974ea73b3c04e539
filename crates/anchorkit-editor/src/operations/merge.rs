use anchorkit_core::{EditError, EditResult, InstructionId};
use anchorkit_path::{
    invert, is_endpoint, split_into_subpaths, subpath_of, Instruction, PathNode, Subpath,
    VectorPath,
};

use super::Effect;
use crate::continuity::resolve_anchor;

fn endpoint_index(path: &VectorPath, id: InstructionId) -> EditResult<usize> {
    let index = resolve_anchor(path, id)?;
    if !is_endpoint(path, path.nodes()[index].id) {
        return Err(EditError::NotAnEndpoint(id));
    }
    Ok(index)
}

/// Nodes of `sp`, reversed when `flip` is set. Reversed instructions get
/// fresh ids.
fn oriented(path: &mut VectorPath, sp: &Subpath, flip: bool) -> Vec<PathNode> {
    let nodes = path.nodes()[sp.range.clone()].to_vec();
    if !flip {
        return nodes;
    }
    let instructions: Vec<Instruction> = nodes.iter().map(|n| n.instruction).collect();
    invert(&instructions)
        .into_iter()
        .map(|ins| path.make_node(ins))
        .collect()
}

/// Joins two open-subpath endpoints.
///
/// Both ends of the same subpath close it. Ends of different subpaths are
/// joined tail to head, inverting either side as needed; the second
/// subpath's `Move` is dropped when it coincides with the join point and
/// becomes a connecting `Line` otherwise. Merging an anchor with itself is a
/// no-op.
pub fn merge_subpaths(path: &mut VectorPath, a: InstructionId, b: InstructionId) -> EditResult<Effect> {
    let ia = endpoint_index(path, a)?;
    let ib = endpoint_index(path, b)?;
    if ia == ib {
        return Ok(Effect::none());
    }
    let (Some(sa), Some(sb)) = (subpath_of(path, ia), subpath_of(path, ib)) else {
        return Ok(Effect::none());
    };

    if sa.index == sb.index {
        path.insert(sa.range.end, Instruction::Close);
        path.normalize();
        tracing::debug!("merge {} + {}: closed subpath {}", a, b, sa.index);
        return Ok(Effect::structural(vec![path.nodes()[sa.first()].id]));
    }

    // A must end at the join, B must start there.
    let flip_a = ia == sa.first() && sa.len() > 1;
    let flip_b = ib != sb.first();
    let a_nodes = oriented(path, &sa, flip_a);
    let mut b_nodes = oriented(path, &sb, flip_b);

    let join = a_nodes.last().and_then(|n| n.instruction.anchor());
    let b_head = b_nodes.first().and_then(|n| n.instruction.anchor());
    if join.is_some() && join == b_head {
        b_nodes.remove(0);
    } else if let Some(head) = b_nodes.first_mut() {
        head.instruction = head.instruction.to_line();
    }

    let mut merged = a_nodes;
    merged.extend(b_nodes);

    let mut rebuilt: Vec<PathNode> = Vec::with_capacity(path.len());
    for sp in split_into_subpaths(path) {
        if sp.index == sa.index {
            rebuilt.extend(merged.iter().copied());
        } else if sp.index != sb.index {
            rebuilt.extend_from_slice(&path.nodes()[sp.range]);
        }
    }
    let head = merged.first().map(|n| n.id);
    let len = path.len();
    path.splice_nodes(0..len, rebuilt);

    tracing::debug!("merge {} + {}: joined subpaths {} and {}", a, b, sa.index, sb.index);
    Ok(Effect::structural(head.into_iter().collect()))
}

/// Reverses the subpath containing `anchor`.
pub fn invert_subpath(path: &mut VectorPath, anchor: InstructionId) -> EditResult<Effect> {
    let index = resolve_anchor(path, anchor)?;
    let sp = subpath_of(path, index).ok_or(EditError::AnchorNotFound(anchor))?;
    if sp.len() < 2 {
        return Ok(Effect::none());
    }
    let nodes = oriented(path, &sp, true);
    let head = nodes.first().map(|n| n.id);
    path.splice_nodes(sp.range.clone(), nodes);
    tracing::debug!("inverted subpath {}", sp.index);
    Ok(Effect::structural(head.into_iter().collect()))
}
