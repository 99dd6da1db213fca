//! Table rendering for CLI output

use crate::domain::images::ContainerImage;
use crate::domain::status::{Node, Pod};
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};

/// Table renderer for formatted status output
#[derive(Default)]
pub struct TableRenderer;

impl TableRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render node status as a formatted table
    pub fn render_nodes(&self, nodes: &[Node], wide: bool) -> String {
        if nodes.is_empty() {
            return "No nodes found".to_string();
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        let mut header = vec![
            Cell::new("STATUS").set_alignment(CellAlignment::Center),
            Cell::new("NAME").set_alignment(CellAlignment::Left),
            Cell::new("ROLE").set_alignment(CellAlignment::Left),
            Cell::new("AGE").set_alignment(CellAlignment::Left),
            Cell::new("VERSION").set_alignment(CellAlignment::Left),
        ];
        if wide {
            header.extend(vec![
                Cell::new("INTERNAL-IP").set_alignment(CellAlignment::Left),
                Cell::new("OS-IMAGE").set_alignment(CellAlignment::Left),
                Cell::new("KERNEL").set_alignment(CellAlignment::Left),
                Cell::new("RUNTIME").set_alignment(CellAlignment::Left),
                Cell::new("CPU/MEM/STORAGE").set_alignment(CellAlignment::Left),
            ]);
        }
        table.set_header(header);

        for node in nodes {
            let status_color = if node.is_ready {
                Color::Green
            } else {
                Color::Red
            };

            let mut row = vec![
                Cell::new(&node.status).fg(status_color),
                Cell::new(&node.name),
                Cell::new(&node.role),
                Cell::new(&node.age),
                Cell::new(&node.kubelet_version),
            ];
            if wide {
                row.extend(vec![
                    Cell::new(&node.internal_ip),
                    Cell::new(&node.os_image),
                    Cell::new(&node.kernel_version),
                    Cell::new(&node.container_runtime),
                    Cell::new(format!(
                        "{}/{}/{}",
                        node.capacity.cpu, node.capacity.memory, node.capacity.storage
                    )),
                ]);
            }
            table.add_row(row);
        }

        table.to_string()
    }

    /// Render pod status as a formatted table
    pub fn render_pods(&self, pods: &[Pod], wide: bool) -> String {
        if pods.is_empty() {
            return "No pods found".to_string();
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        let mut header = vec![
            Cell::new("STATUS").set_alignment(CellAlignment::Center),
            Cell::new("NAMESPACE").set_alignment(CellAlignment::Left),
            Cell::new("NAME").set_alignment(CellAlignment::Left),
            Cell::new("READY").set_alignment(CellAlignment::Center),
            Cell::new("RESTARTS").set_alignment(CellAlignment::Center),
            Cell::new("AGE").set_alignment(CellAlignment::Left),
        ];
        if wide {
            header.extend(vec![
                Cell::new("IP").set_alignment(CellAlignment::Left),
                Cell::new("NODE").set_alignment(CellAlignment::Left),
            ]);
        }
        table.set_header(header);

        for pod in pods {
            let status_color = if pod.is_running {
                Color::Green
            } else {
                Color::Yellow
            };

            let mut row = vec![
                Cell::new(&pod.status).fg(status_color),
                Cell::new(&pod.namespace),
                Cell::new(&pod.name),
                Cell::new(&pod.ready),
                Cell::new(&pod.restarts),
                Cell::new(&pod.age),
            ];
            if wide {
                row.extend(vec![Cell::new(&pod.ip), Cell::new(&pod.node)]);
            }
            table.add_row(row);
        }

        table.to_string()
    }

    /// Render the container image inventory as a formatted table
    pub fn render_images(&self, images: &[ContainerImage]) -> String {
        if images.is_empty() {
            return "No container images were found in the cluster".to_string();
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("IMAGE ID").set_alignment(CellAlignment::Left),
            Cell::new("REPOSITORY").set_alignment(CellAlignment::Left),
            Cell::new("TAG").set_alignment(CellAlignment::Left),
            Cell::new("NODE").set_alignment(CellAlignment::Left),
            Cell::new("SIZE").set_alignment(CellAlignment::Right),
        ]);

        for image in images {
            table.add_row(vec![
                Cell::new(&image.image_id),
                Cell::new(&image.repository),
                Cell::new(&image.tag),
                Cell::new(&image.node),
                Cell::new(&image.size),
            ]);
        }

        table.to_string()
    }
}
