pub mod matrix_uvs;
