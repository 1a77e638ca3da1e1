pub mod cpu_rasterizer;
