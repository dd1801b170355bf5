//! Frame submission.

use super::{DynamicBuffer, RenderEngine, ViewUniforms};
use crate::buffer::{create_vertex_buffer, update_buffer};
use crate::error::{RenderError, RenderResult};
use crate::sink::{RenderFrame, RenderSink};

impl DynamicBuffer {
    /// Uploads `data`, reusing `slot` when it is large enough.
    fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        slot: &mut Option<DynamicBuffer>,
        data: &[f32],
        label: &str,
    ) {
        let len = u32::try_from(data.len() / 3).unwrap_or(u32::MAX);
        let bytes = std::mem::size_of_val(data) as wgpu::BufferAddress;
        match slot {
            Some(existing) if existing.buffer.size() >= bytes => {
                update_buffer(queue, &existing.buffer, data);
                existing.len = len;
            }
            _ => {
                *slot = Some(DynamicBuffer {
                    buffer: create_vertex_buffer(device, data, Some(label)),
                    len,
                });
            }
        }
    }
}

impl RenderEngine {
    pub(super) fn upload(&mut self, frame: &RenderFrame<'_>) {
        let uniforms = ViewUniforms {
            transform: frame.transform.to_cols_array_2d(),
        };
        self.queue
            .write_buffer(&self.view_buffer, 0, bytemuck::cast_slice(&[uniforms]));

        if frame.triangle_vertex_count() > 0 {
            DynamicBuffer::upload(
                &self.device,
                &self.queue,
                &mut self.triangle_positions,
                frame.triangle_positions,
                "triangle positions",
            );
            DynamicBuffer::upload(
                &self.device,
                &self.queue,
                &mut self.triangle_colors,
                frame.triangle_colors,
                "triangle colors",
            );
        }
        if frame.line_vertex_count() > 0 {
            DynamicBuffer::upload(
                &self.device,
                &self.queue,
                &mut self.line_positions,
                frame.line_positions,
                "electrode positions",
            );
            DynamicBuffer::upload(
                &self.device,
                &self.queue,
                &mut self.line_colors,
                frame.line_colors,
                "electrode colors",
            );
        }
    }

    pub(super) fn encode(
        &self,
        frame: &RenderFrame<'_>,
        view: &wgpu::TextureView,
    ) -> wgpu::CommandBuffer {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("eitview encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Mesh Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(frame.background.x),
                            g: f64::from(frame.background.y),
                            b: f64::from(frame.background.z),
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            render_pass.set_bind_group(0, &self.view_bind_group, &[]);

            let draws = [
                (
                    &self.triangle_pipeline,
                    &self.triangle_positions,
                    &self.triangle_colors,
                    frame.triangle_vertex_count(),
                ),
                (
                    &self.line_pipeline,
                    &self.line_positions,
                    &self.line_colors,
                    frame.line_vertex_count(),
                ),
            ];
            for (pipeline, positions, colors, count) in draws {
                let (Some(positions), Some(colors)) = (positions, colors) else {
                    continue;
                };
                if count == 0 {
                    continue;
                }
                render_pass.set_pipeline(pipeline);
                render_pass.set_vertex_buffer(0, positions.buffer.slice(..));
                render_pass.set_vertex_buffer(1, colors.buffer.slice(..));
                render_pass.draw(0..positions.len.min(colors.len), 0..1);
            }
        }

        encoder.finish()
    }
}

impl RenderSink for RenderEngine {
    #[allow(clippy::cast_precision_loss)]
    fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    fn submit(&mut self, frame: &RenderFrame<'_>) -> RenderResult<()> {
        frame.validate()?;

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.resize(self.width, self.height);
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory");
                return Err(RenderError::OutOfMemory);
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timeout");
                return Ok(());
            }
            Err(wgpu::SurfaceError::Other) => {
                log::warn!("Surface error");
                return Ok(());
            }
        };

        self.upload(frame);
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let commands = self.encode(frame, &view);
        self.queue.submit(std::iter::once(commands));
        output.present();
        Ok(())
    }
}
